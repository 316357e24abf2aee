use anyhow::Context;
use cineos_common::association::Association;
use cineos_common::config::Config;
use cineos_common::{Catalog, Side, UNBOUNDED};
use colored::*;

use crate::terminal::{colors, format::Detail, print};

pub fn schema(cfg: &Config) -> anyhow::Result<()> {
    let mut catalog = Catalog::with_config(cfg);
    cineos_core::schema::register(&mut catalog).context("registering the cinema schema")?;

    let registry = catalog.registry();
    for (idx, association) in registry.iter().enumerate() {
        if cfg.quiet < 2 {
            print::entry(idx, association.name(), &association_to_details(&catalog, association));
            print::blank();
        }
    }

    cineos_common::success!("{} associations registered", registry.len());
    Ok(())
}

fn association_to_details(catalog: &Catalog, association: &Association) -> Vec<Detail> {
    let (first, second) = association.kinds();
    let bounds = association.bounds();
    let mut details: Vec<Detail> = vec![
        ("Kind".to_string(), association.label().normal()),
        (
            role_label(association, Side::First),
            format!("{} {}", first, multiplicity(bounds.lower_for(Side::First), bounds.upper_for(Side::First)).color(colors::BOUNDS)).normal(),
        ),
        (
            role_label(association, Side::Second),
            format!("{} {}", second, multiplicity(bounds.lower_for(Side::Second), bounds.upper_for(Side::Second)).color(colors::BOUNDS)).normal(),
        ),
    ];

    if let Association::Qualified(qualified) = association {
        details.push(("Key".to_string(), short_type(qualified.qualifier_type()).color(colors::ACCENT)));
    }

    for (name, view) in catalog.registry().views_of(association.name()) {
        let from = match view.from {
            Side::First => first,
            Side::Second => second,
        };
        details.push(("View".to_string(), format!("{name} (from {from})").color(colors::PRIMARY)));
    }
    details
}

fn role_label(association: &Association, side: Side) -> String {
    match (association, side) {
        (Association::Qualified(_), Side::First) => "Identifier".to_string(),
        (Association::Qualified(_), Side::Second) => "Target".to_string(),
        (_, Side::First) => "First".to_string(),
        (_, Side::Second) => "Second".to_string(),
    }
}

fn multiplicity(lower: usize, upper: usize) -> String {
    match upper {
        UNBOUNDED => format!("{lower}..*"),
        upper => format!("{lower}..{upper}"),
    }
}

fn short_type(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}
