//! Incidence relations: the 0/1 input of an exact cover problem

pub mod incidence;
pub mod io;

pub use incidence::Relation;
pub use io::{
    create_example_relations, load_relation_from_file, parse_relation_from_string,
    save_relation_to_file,
};
