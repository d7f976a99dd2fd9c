use strum::EnumCount;

/// A scraped rating, in output column order.
///
/// The `Display` form is the CSV header name of the column.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
)]
pub enum Attribute {
    #[strum(serialize = "rating")]
    Overall,
    #[strum(serialize = "insideRating")]
    CloseShot,
    #[strum(serialize = "midRating")]
    MidRangeShot,
    #[strum(serialize = "threeRating")]
    ThreePointShot,
    #[strum(serialize = "freeThrowPercent")]
    FreeThrow,
    #[strum(serialize = "interiorDefense")]
    InteriorDefense,
    #[strum(serialize = "perimeterDefense")]
    PerimeterDefense,
    #[strum(serialize = "orbRating")]
    OffensiveRebound,
    #[strum(serialize = "drbRating")]
    DefensiveRebound,
    #[strum(serialize = "astRating")]
    Assist,
    #[strum(serialize = "stlRating")]
    Steal,
    #[strum(serialize = "blkRating")]
    Block,
    #[strum(serialize = "layupRating")]
    Layup,
    #[strum(serialize = "standDunk")]
    StandingDunk,
    #[strum(serialize = "drivingDunk")]
    DrivingDunk,
    #[strum(serialize = "athleticism")]
    Athleticism,
    #[strum(serialize = "durability")]
    Durability,
    #[strum(serialize = "offConst")]
    OffensiveConsistency,
    #[strum(serialize = "defConst")]
    DefensiveConsistency,
    #[strum(serialize = "drawFoul")]
    DrawFoul,
}

/// The ratings scraped from one profile page, kept as page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedAttributes {
    values: Vec<String>,
}

impl ScrapedAttributes {
    /// Build from values given in [`Attribute`] order. Returns `None` unless
    /// exactly one value per attribute is supplied.
    pub fn from_values(values: Vec<String>) -> Option<Self> {
        (values.len() == Attribute::COUNT).then_some(Self { values })
    }

    pub fn get(&self, attribute: Attribute) -> &str {
        &self.values[attribute as usize]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}
