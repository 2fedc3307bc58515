//! Star Wars flavored type graph.
//!
//! `Character` is implemented by `Human` and `Droid`, but not by `Starship`,
//! which is still reachable through the `SearchResult` union. `Planet` isn't
//! reachable from `Query` at all.

use std::sync::{Arc, LazyLock};

use crate::{
    schema::{
        meta::{
            Argument, EnumMeta, EnumValue, Field, Fields, InterfaceMeta, MetaType, ObjectMeta,
            UnionMeta,
        },
        model::TypeType,
    },
    types::scalars,
};

static EPISODE: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        EnumMeta::new(
            "Episode",
            &[
                EnumValue::new("NEW_HOPE"),
                EnumValue::new("EMPIRE"),
                EnumValue::new("JEDI"),
            ],
        )
        .into_meta(),
    )
});

fn character_fields() -> Vec<Field> {
    vec![
        Field::new("id", TypeType::from(scalars::string()).non_null()),
        Field::new("name", scalars::string()),
        Field::new("friends", TypeType::from(character()).list()),
        Field::new("appearsIn", TypeType::from(episode()).non_null().list()),
    ]
}

static CHARACTER: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        InterfaceMeta::new("Character", Fields::lazy(character_fields))
            .description("A character in the Star Wars Trilogy")
            .into_meta(),
    )
});

static HUMAN: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "Human",
            Fields::lazy(|| {
                let mut fields = character_fields();
                fields.push(Field::new("homePlanet", scalars::string()));
                fields
            }),
        )
        .interfaces(&[character()])
        .into_meta(),
    )
});

static DROID: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "Droid",
            Fields::lazy(|| {
                let mut fields = character_fields();
                fields.push(Field::new("primaryFunction", scalars::string()));
                fields
            }),
        )
        .interfaces(&[character()])
        .into_meta(),
    )
});

static STARSHIP: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "Starship",
            Fields::new(vec![
                Field::new("name", TypeType::from(scalars::string()).non_null()),
                Field::new("length", scalars::float()),
            ]),
        )
        .into_meta(),
    )
});

static SEARCH_RESULT: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(UnionMeta::new("SearchResult", &[human(), droid(), starship()]).into_meta())
});

static PLANET: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "Planet",
            Fields::new(vec![Field::new("population", scalars::int())]),
        )
        .into_meta(),
    )
});

static QUERY: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "Query",
            Fields::lazy(|| {
                vec![
                    Field::new("hero", character())
                        .argument(Argument::new("episode", episode())),
                    Field::new("human", human()).argument(Argument::new(
                        "id",
                        TypeType::from(scalars::id()).non_null(),
                    )),
                    Field::new("droid", droid()).argument(Argument::new(
                        "id",
                        TypeType::from(scalars::id()).non_null(),
                    )),
                    Field::new("search", TypeType::from(search_result()).list()).argument(
                        Argument::new("text", TypeType::from(scalars::string()).non_null()),
                    ),
                ]
            }),
        )
        .description("The root query object of the schema")
        .into_meta(),
    )
});

pub fn query() -> Arc<MetaType> {
    QUERY.clone()
}

pub fn episode() -> Arc<MetaType> {
    EPISODE.clone()
}

pub fn character() -> Arc<MetaType> {
    CHARACTER.clone()
}

pub fn human() -> Arc<MetaType> {
    HUMAN.clone()
}

pub fn droid() -> Arc<MetaType> {
    DROID.clone()
}

pub fn starship() -> Arc<MetaType> {
    STARSHIP.clone()
}

pub fn search_result() -> Arc<MetaType> {
    SEARCH_RESULT.clone()
}

pub fn planet() -> Arc<MetaType> {
    PLANET.clone()
}
