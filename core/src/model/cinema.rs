use cineos_common::{Catalog, Entity, Oid};
use tracing::debug;

use super::{Projection, ProjectionRoom, RoomExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cinema {
    pub name: String,
    pub city: String,
}

impl Entity for Cinema {
    const KIND: &'static str = "Cinema";
}

impl Cinema {
    pub fn create(catalog: &mut Catalog, name: impl Into<String>, city: impl Into<String>) -> Oid<Cinema> {
        let cinema = catalog.register(Cinema {
            name: name.into(),
            city: city.into(),
        });
        debug!(%cinema, "cinema opened");
        cinema
    }
}

pub trait CinemaExt {
    /// Rooms composed into the cinema, in creation order.
    fn rooms(self, catalog: &Catalog) -> Vec<Oid<ProjectionRoom>>;
    /// Projections held in any of the cinema's rooms.
    fn projections(self, catalog: &Catalog) -> cineos_common::Result<Vec<Oid<Projection>>>;
}

impl CinemaExt for Oid<Cinema> {
    fn rooms(self, catalog: &Catalog) -> Vec<Oid<ProjectionRoom>> {
        catalog.parts::<ProjectionRoom>(self)
    }

    fn projections(self, catalog: &Catalog) -> cineos_common::Result<Vec<Oid<Projection>>> {
        let mut projections = Vec::new();
        for room in self.rooms(catalog) {
            projections.extend(room.projections(catalog)?);
        }
        Ok(projections)
    }
}
