//! Player profile page parsing.
//!
//! The ratings tab of a profile page is laid out as three columns of two
//! cards each. Every card lists its sub-ratings as `<span>` values, and the
//! values are read by position rather than by label. [`FIELD_TABLE`] says
//! where each output attribute comes from. Every card is checked against the
//! highest position the table reads from it before any value is taken, so a
//! change in the page layout fails with [`RatingsError::SchemaMismatch`]
//! naming the card.

use std::collections::HashMap;

use itertools::Itertools;
use scraper::{CaseSensitivity, ElementRef, Html, Selector};
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, instrument};

use crate::error::{RatingsError, Result};
use crate::model::{Attribute, ScrapedAttributes};
use crate::scraper::{element_text, select_first};

/// Number of playmaking sub-ratings the assist rating is derived from.
const PLAYMAKING_VALUES: usize = 5;

/// Position of the playmaking sub-rating left out of the assist average.
const ASSIST_SKIPPED: usize = 2;

/// A card on the ratings tab.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
enum Card {
    #[strum(serialize = "outside scoring card")]
    OutsideScoring,
    #[strum(serialize = "athleticism card")]
    Athleticism,
    #[strum(serialize = "inside scoring card")]
    InsideScoring,
    #[strum(serialize = "playmaking card")]
    Playmaking,
    #[strum(serialize = "defending card")]
    Defending,
    #[strum(serialize = "rebounding card")]
    Rebounding,
}

impl Card {
    /// Zero-based (column, card within column).
    fn position(self) -> (usize, usize) {
        match self {
            Card::OutsideScoring => (0, 0),
            Card::Athleticism => (0, 1),
            Card::InsideScoring => (1, 0),
            Card::Playmaking => (1, 1),
            Card::Defending => (2, 0),
            Card::Rebounding => (2, 1),
        }
    }

    fn name(self) -> &'static str {
        self.into()
    }
}

/// Where an attribute's value is read from.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// The headline overall rating above the tabs.
    Overall,
    /// The `index`-th value listed in a card.
    Value { card: Card, index: usize },
    /// The summary value in a card's header.
    Header(Card),
    /// Derived from the playmaking card, see [`assist_rating`].
    AssistAverage,
}

const FIELD_TABLE: [(Attribute, Source); Attribute::COUNT] = [
    (Attribute::Overall, Source::Overall),
    (Attribute::CloseShot, value(Card::OutsideScoring, 0)),
    (Attribute::MidRangeShot, value(Card::OutsideScoring, 1)),
    (Attribute::ThreePointShot, value(Card::OutsideScoring, 2)),
    (Attribute::FreeThrow, value(Card::OutsideScoring, 3)),
    (Attribute::InteriorDefense, value(Card::Defending, 0)),
    (Attribute::PerimeterDefense, value(Card::Defending, 1)),
    (Attribute::OffensiveRebound, value(Card::Rebounding, 0)),
    (Attribute::DefensiveRebound, value(Card::Rebounding, 1)),
    (Attribute::Assist, Source::AssistAverage),
    (Attribute::Steal, value(Card::Defending, 2)),
    (Attribute::Block, value(Card::Defending, 3)),
    (Attribute::Layup, value(Card::InsideScoring, 0)),
    (Attribute::StandingDunk, value(Card::InsideScoring, 1)),
    (Attribute::DrivingDunk, value(Card::InsideScoring, 2)),
    (Attribute::Athleticism, Source::Header(Card::Athleticism)),
    (Attribute::Durability, value(Card::Athleticism, 6)),
    (Attribute::OffensiveConsistency, value(Card::OutsideScoring, 5)),
    (Attribute::DefensiveConsistency, value(Card::Defending, 7)),
    (Attribute::DrawFoul, value(Card::InsideScoring, 6)),
];

const fn value(card: Card, index: usize) -> Source {
    Source::Value { card, index }
}

/// Values scraped from one card.
#[derive(Debug, Clone, Default)]
struct CardValues {
    header: Option<String>,
    values: Vec<String>,
}

/// Assist rating from the five playmaking sub-ratings: the third is dropped
/// and the mean of the other four is rounded up. Summed in `u64`, so any
/// `u32` inputs are accepted.
pub fn assist_rating(playmaking: [u32; PLAYMAKING_VALUES]) -> u64 {
    let total: u64 = playmaking
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != ASSIST_SKIPPED)
        .map(|(_, v)| u64::from(*v))
        .sum();
    total.div_ceil((PLAYMAKING_VALUES - 1) as u64)
}

/// Parse a profile page body into its scraped attributes.
#[instrument(skip_all)]
pub fn parse_profile_page(body: &str) -> Result<ScrapedAttributes> {
    let document = Html::parse_document(body);
    parse_profile(&document)
}

pub(crate) fn parse_profile(document: &Html) -> Result<ScrapedAttributes> {
    let overall = parse_overall(document)?;
    let cards = parse_cards(document)?;
    check_card_sizes(&cards)?;

    let values = FIELD_TABLE
        .iter()
        .map(|(attribute, source)| resolve(*attribute, *source, &overall, &cards))
        .collect::<Result<Vec<_>>>()?;

    debug!(overall = %overall, "parsed profile ratings");

    ScrapedAttributes::from_values(values).ok_or(RatingsError::ElementNotFound {
        context: "profile attributes",
    })
}

fn resolve(
    attribute: Attribute,
    source: Source,
    overall: &str,
    cards: &HashMap<Card, CardValues>,
) -> Result<String> {
    match source {
        Source::Overall => Ok(overall.to_string()),
        Source::Value { card, index } => Ok(card_values(cards, card)?.values[index].clone()),
        Source::Header(card) => card_values(cards, card)?
            .header
            .clone()
            .ok_or(RatingsError::ElementNotFound {
                context: "card header",
            }),
        Source::AssistAverage => {
            let playmaking = card_values(cards, Card::Playmaking)?
                .values
                .iter()
                .take(PLAYMAKING_VALUES)
                .map(|v| v.trim().parse::<u32>())
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let playmaking: [u32; PLAYMAKING_VALUES] =
                playmaking
                    .try_into()
                    .map_err(|found: Vec<u32>| RatingsError::SchemaMismatch {
                        card: Card::Playmaking.name(),
                        expected: PLAYMAKING_VALUES,
                        found: found.len(),
                    })?;
            let rating = assist_rating(playmaking);
            debug!(?attribute, ?playmaking, rating, "derived rating");
            Ok(rating.to_string())
        }
    }
}

fn card_values(cards: &HashMap<Card, CardValues>, card: Card) -> Result<&CardValues> {
    cards
        .get(&card)
        .ok_or(RatingsError::ElementNotFound { context: card.name() })
}

/// How many values the field table reads from `card`.
fn required_values(card: Card) -> usize {
    FIELD_TABLE
        .iter()
        .filter_map(|(_, source)| match *source {
            Source::Value { card: c, index } if c == card => Some(index + 1),
            Source::AssistAverage if card == Card::Playmaking => Some(PLAYMAKING_VALUES),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

fn check_card_sizes(cards: &HashMap<Card, CardValues>) -> Result<()> {
    for card in Card::iter() {
        let expected = required_values(card);
        let found = card_values(cards, card)?.values.len();
        if found < expected {
            return Err(RatingsError::SchemaMismatch {
                card: card.name(),
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn parse_overall(document: &Html) -> Result<String> {
    let container_selector = Selector::parse("div.w-100.text-center.mb-4")?;
    let span_selector = Selector::parse("span")?;

    let root = document.root_element();
    let container = select_first(&root, &container_selector, "overall rating container")?;
    let span = select_first(&container, &span_selector, "overall rating")?;
    Ok(element_text(&span))
}

/// The three rating columns of the attributes tab, in page order.
fn select_columns(document: &Html) -> Result<[ElementRef<'_>; 3]> {
    let tab_selector = Selector::parse("div.tab-content.mb-4.pb-2")?;
    let column_selector = Selector::parse("div.col-12.col-md-4")?;

    let root = document.root_element();
    let tab = select_first(&root, &tab_selector, "ratings tab")?;

    let (first, rest): (Vec<ElementRef>, Vec<ElementRef>) = tab
        .select(&column_selector)
        .partition(|c| c.value().has_class("ml-md-n1", CaseSensitivity::CaseSensitive));

    let first = first
        .into_iter()
        .next()
        .ok_or(RatingsError::ElementNotFound {
            context: "first ratings column",
        })?;
    let (second, third) = rest
        .into_iter()
        .next_tuple()
        .ok_or(RatingsError::ElementNotFound {
            context: "second and third ratings columns",
        })?;

    Ok([first, second, third])
}

fn parse_cards(document: &Html) -> Result<HashMap<Card, CardValues>> {
    let columns = select_columns(document)?;
    let card_selector = Selector::parse("div.card")?;

    Card::iter()
        .map(|card| {
            let (column, position) = card.position();
            let element = columns[column]
                .select(&card_selector)
                .nth(position)
                .ok_or(RatingsError::ElementNotFound { context: card.name() })?;
            Ok((card, parse_card(&element)?))
        })
        .collect()
}

fn parse_card(card: &ElementRef) -> Result<CardValues> {
    let header_selector = Selector::parse("div.card-header span")?;
    let list_selector = Selector::parse("ul.list-group.list-no-bullet")?;
    let value_selector = Selector::parse("span")?;

    let header = card.select(&header_selector).next().map(|h| element_text(&h));
    let list = select_first(card, &list_selector, "card value list")?;
    let values = list
        .select(&value_selector)
        .map(|v| element_text(&v))
        .collect_vec();

    Ok(CardValues { header, values })
}
