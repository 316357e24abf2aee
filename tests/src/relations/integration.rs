#![cfg(test)]
use cineos_common::config::{Config, DuplicateLinks};
use cineos_common::registry::View;
use cineos_common::{Bounds, Catalog, Entity, ObjectRef, RelationError, Side, UNBOUNDED};

#[derive(Debug)]
struct Author(&'static str);

#[derive(Debug)]
struct Book(&'static str);

#[derive(Debug)]
struct Shelf;

impl Entity for Author {
    const KIND: &'static str = "Author";
}

impl Entity for Book {
    const KIND: &'static str = "Book";
}

impl Entity for Shelf {
    const KIND: &'static str = "Shelf";
}

const WROTE: &str = "Wrote";
const FROM_AUTHOR_TO_BOOK: &str = "FromAuthorToBook";
const FROM_BOOK_TO_AUTHOR: &str = "FromBookToAuthor";

fn library(bounds: Bounds) -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .register_association::<Author, Book>(WROTE, bounds)
        .unwrap();
    catalog
        .register_views(WROTE, FROM_AUTHOR_TO_BOOK, FROM_BOOK_TO_AUTHOR)
        .unwrap();
    catalog
}

#[test]
fn registered_bounds_are_reported_unchanged() {
    let tuples = [
        Bounds::new(0, 1, 0, 1),
        Bounds::new(1, 1, 0, UNBOUNDED),
        Bounds::new(2, 5, 3, 3),
        Bounds::upper(4, 7),
        Bounds::many(),
    ];
    for (idx, bounds) in tuples.into_iter().enumerate() {
        let mut catalog = Catalog::new();
        let name = format!("Association{idx}");
        catalog.register_association::<Author, Book>(&name, bounds).unwrap();

        assert!(catalog.association_exists(&name));
        assert_eq!(catalog.bounds_for(&name), Some(bounds));
    }
}

#[test]
fn second_registration_fails_and_keeps_the_first() {
    let mut catalog = library(Bounds::new(0, 2, 0, 3));

    let err = catalog
        .register_association::<Author, Book>(WROTE, Bounds::many())
        .unwrap_err();

    assert_eq!(err, RelationError::DuplicateAssociation(WROTE.to_string()));
    assert_eq!(catalog.bounds_for(WROTE), Some(Bounds::new(0, 2, 0, 3)));
}

#[test]
fn unknown_names_have_no_bounds() {
    let catalog = library(Bounds::many());
    assert_eq!(catalog.bounds_for("unknown"), None);
    assert!(!catalog.association_exists("unknown"));
}

#[test]
fn registration_rejects_bad_input() {
    let mut catalog = Catalog::new();

    assert!(matches!(
        catalog.register_association::<Author, Book>("Zero", Bounds::new(0, 0, 0, 1)),
        Err(RelationError::InvalidBound { .. })
    ));
    assert!(matches!(
        catalog.register_association::<Author, Book>("Inverted", Bounds::new(3, 2, 0, 1)),
        Err(RelationError::InvalidBound { .. })
    ));
    assert_eq!(
        catalog.register_association::<Author, Book>("  ", Bounds::many()),
        Err(RelationError::InvalidName)
    );
    assert!(catalog.registry().is_empty());
}

#[test]
fn upper_bound_is_checked_before_linking() {
    let mut catalog = library(Bounds::upper(1, UNBOUNDED));
    let author = catalog.register(Author("Lem"));
    let first = catalog.register(Book("Solaris"));
    let second = catalog.register(Book("Fiasco"));

    catalog.link(WROTE, author, first).unwrap();
    let err = catalog.link(WROTE, author, second).unwrap_err();

    assert!(matches!(
        err,
        RelationError::CardinalityExceeded { side: Side::First, upper: 1, .. }
    ));
    assert_eq!(catalog.linked(FROM_AUTHOR_TO_BOOK, author).unwrap(), vec![first]);
    assert!(catalog.linked::<Author>(FROM_BOOK_TO_AUTHOR, second).unwrap().is_empty());
}

#[test]
fn links_are_visible_from_both_views() {
    let mut catalog = library(Bounds::many());
    let author = catalog.register(Author("Tokarczuk"));
    let book = catalog.register(Book("Flights"));

    catalog
        .add_association(FROM_BOOK_TO_AUTHOR, FROM_AUTHOR_TO_BOOK, book, author)
        .unwrap();

    assert_eq!(catalog.linked(FROM_AUTHOR_TO_BOOK, author).unwrap(), vec![book]);
    assert_eq!(catalog.linked(FROM_BOOK_TO_AUTHOR, book).unwrap(), vec![author]);
    assert_eq!(
        catalog.linked_objects(WROTE, book).unwrap(),
        vec![ObjectRef::from(author)]
    );
    assert_eq!(
        catalog.registry().view(FROM_BOOK_TO_AUTHOR),
        Some(&View {
            association: WROTE.to_string(),
            from: Side::Second,
        })
    );
}

#[test]
fn views_must_belong_together() {
    let mut catalog = library(Bounds::many());
    catalog
        .register_association::<Author, Shelf>("Owns", Bounds::many())
        .unwrap();
    catalog
        .register_views("Owns", "FromAuthorToShelf", "FromShelfToAuthor")
        .unwrap();
    let author = catalog.register(Author("Szymborska"));
    let book = catalog.register(Book("Calling Out to Yeti"));

    assert!(matches!(
        catalog.add_association(FROM_AUTHOR_TO_BOOK, "FromShelfToAuthor", author, book),
        Err(RelationError::ViewMismatch { .. })
    ));
    assert!(matches!(
        catalog.linked_objects("FromNowhere", author),
        Err(RelationError::AssociationNotFound(_))
    ));
}

#[test]
fn repeated_pairs_follow_the_configured_policy() {
    let mut strict = library(Bounds::many());
    let author = strict.register(Author("Mickiewicz"));
    let book = strict.register(Book("Pan Tadeusz"));
    strict.link(WROTE, author, book).unwrap();
    assert!(matches!(
        strict.link(WROTE, author, book),
        Err(RelationError::AlreadyLinked { .. })
    ));

    let config = Config {
        duplicate_links: DuplicateLinks::Count,
        ..Config::default()
    };
    let mut counting = Catalog::with_config(&config);
    counting
        .register_association::<Author, Book>(WROTE, Bounds::upper(2, UNBOUNDED))
        .unwrap();
    let author = counting.register(Author("Mickiewicz"));
    let book = counting.register(Book("Pan Tadeusz"));
    counting.link(WROTE, author, book).unwrap();
    counting.link(WROTE, author, book).unwrap();
    assert_eq!(counting.linked::<Book>(WROTE, author).unwrap(), vec![book, book]);
    assert!(matches!(
        counting.link(WROTE, author, book),
        Err(RelationError::CardinalityExceeded { .. })
    ));
}

#[test]
fn qualified_lookup_uses_the_registered_rule() {
    let mut catalog = Catalog::new();
    catalog
        .qualified::<Shelf, Book, u32>("ShelfSlot")
        .compare_with(|a: &u32, b: &u32| a == b)
        .register()
        .unwrap();
    let shelf = catalog.register(Shelf);
    let book = catalog.register(Book("Ferdydurke"));

    catalog.link_qualified("ShelfSlot", shelf, 5_u32, book).unwrap();

    assert_eq!(
        catalog.lookup("ShelfSlot", shelf, &5_u32).unwrap(),
        vec![ObjectRef::from(book)]
    );
    assert!(catalog.lookup("ShelfSlot", shelf, &6_u32).unwrap().is_empty());
}

#[test]
fn qualified_registration_needs_a_rule() {
    let mut catalog = Catalog::new();
    let err = catalog
        .qualified::<Shelf, Book, u32>("ShelfSlot")
        .bounds(Bounds::upper(10, 1))
        .register()
        .unwrap_err();
    assert_eq!(err, RelationError::MissingComparer("ShelfSlot".to_string()));
    assert!(!catalog.association_exists("ShelfSlot"));
}

#[test]
fn ownership_keeps_insertion_order_and_cascades() {
    let mut catalog = Catalog::new();
    let shelf = catalog.register(Shelf);
    let first = catalog.register(Book("Quo Vadis"));
    let second = catalog.register(Book("The Doll"));
    let author = catalog.register(Author("Prus"));

    catalog.add_part(shelf, first).unwrap();
    catalog.add_part(shelf, second).unwrap();
    catalog.add_part(second, author).unwrap();

    assert_eq!(catalog.parts::<Book>(shelf), vec![first, second]);
    assert_eq!(
        catalog.cascade(shelf),
        vec![first.erase(), second.erase(), author.erase()]
    );
    assert!(matches!(
        catalog.add_part(shelf, author),
        Err(RelationError::PartAlreadyOwned { .. })
    ));
    assert!(matches!(
        catalog.add_part(author, shelf),
        Err(RelationError::PartAlreadyOwned { .. })
    ));
    assert!(matches!(
        catalog.add_part(shelf, shelf),
        Err(RelationError::SelfOwnership(_))
    ));
}
