use std::fmt;

use cineos_common::{Catalog, Entity, Oid, Result};

use super::Projection;
use crate::schema::FROM_MEDIUM_TO_PROJECTION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediumFormat {
    Digital2D,
    Digital3D,
    Imax,
    Film35mm,
}

impl fmt::Display for MediumFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediumFormat::Digital2D => "2D",
            MediumFormat::Digital3D => "3D",
            MediumFormat::Imax => "IMAX",
            MediumFormat::Film35mm => "35mm",
        };
        f.write_str(label)
    }
}

/// Something shown during a projection: a film copy, a trailer reel, an ad block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medium {
    pub title: String,
    pub format: MediumFormat,
}

impl Entity for Medium {
    const KIND: &'static str = "Medium";
}

pub trait MediumExt {
    fn projections(self, catalog: &Catalog) -> Result<Vec<Oid<Projection>>>;
}

impl MediumExt for Oid<Medium> {
    fn projections(self, catalog: &Catalog) -> Result<Vec<Oid<Projection>>> {
        catalog.linked(FROM_MEDIUM_TO_PROJECTION, self)
    }
}
