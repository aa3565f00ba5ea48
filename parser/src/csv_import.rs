//! Checklist ingestion from CSV exports.
//!
//! Spreadsheet checklists list one card per row with the full set name on
//! every row (`Optic Gold`, `Rated Rookies Press Proof Blue /49`). Rows are
//! folded into one [`ParsedSet`] per base set using name-mode relationship
//! inference: rows whose name has no variant are base cards, the others
//! become parallels of that base.

use std::collections::HashMap;

use checklist_catalog::{InferenceMode, Resolver};
use checklist_core::{ParsedCard, ParsedParallel, ParsedSet};
use tracing::{debug, warn};

use crate::error::ParseError;

const SET_HEADERS: &[&str] = &["set", "set name"];
const CARD_HEADERS: &[&str] = &["card", "card #", "card number", "number"];
const PLAYER_HEADERS: &[&str] = &["player", "player name", "name"];
const TEAM_HEADERS: &[&str] = &["team"];
const PRINT_RUN_HEADERS: &[&str] = &["print run", "serial"];

/// Column positions located from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    set: usize,
    card: usize,
    player: usize,
    team: usize,
    print_run: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, ParseError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|header| aliases.contains(&header.as_str()))
        };
        let require = |label: &str, aliases: &[&str]| {
            find(aliases).ok_or_else(|| ParseError::MissingColumn(label.to_string()))
        };

        Ok(Self {
            set: require("set", SET_HEADERS)?,
            card: require("card", CARD_HEADERS)?,
            player: require("player", PLAYER_HEADERS)?,
            team: require("team", TEAM_HEADERS)?,
            print_run: find(PRINT_RUN_HEADERS),
        })
    }
}

/// One usable data row.
#[derive(Debug)]
struct Row<'r> {
    set_name: &'r str,
    card_number: &'r str,
    player_name: &'r str,
    team: &'r str,
    print_run: Option<u32>,
}

impl Columns {
    fn read<'r>(&self, record: &'r csv::StringRecord) -> Option<Row<'r>> {
        let field = |index: usize| record.get(index).map(str::trim).unwrap_or("");
        let row = Row {
            set_name: field(self.set),
            card_number: field(self.card),
            player_name: field(self.player),
            team: field(self.team),
            print_run: self.print_run.and_then(|index| parse_print_run(field(index))),
        };
        (!row.set_name.is_empty() && !row.card_number.is_empty() && !row.player_name.is_empty())
            .then_some(row)
    }
}

/// Accepts `145`, `/145` and `1/1`.
fn parse_print_run(value: &str) -> Option<u32> {
    let digits = value.rsplit('/').next().unwrap_or(value).trim();
    digits.parse().ok().filter(|run: &u32| *run > 0)
}

#[derive(Debug)]
struct ParallelBuilder {
    name: String,
    print_run: Option<u32>,
    cards: Vec<ParsedCard>,
}

#[derive(Debug)]
struct SetBuilder {
    set: ParsedSet,
    parallels: Vec<ParallelBuilder>,
}

impl SetBuilder {
    fn new(base_name: &str) -> Self {
        Self {
            set: ParsedSet::new(base_name),
            parallels: Vec::new(),
        }
    }

    fn add_base_card(&mut self, card: ParsedCard) {
        if self.set.base_set_print_run.is_none() {
            self.set.base_set_print_run = card.print_run;
        }
        self.set.base_cards.push(card);
    }

    fn add_parallel_card(&mut self, variant: &str, print_run: Option<u32>, card: ParsedCard) {
        let index = match self.parallels.iter().position(|p| p.name == variant) {
            Some(index) => index,
            None => {
                self.parallels.push(ParallelBuilder {
                    name: variant.to_string(),
                    print_run: None,
                    cards: Vec::new(),
                });
                self.parallels.len() - 1
            }
        };
        let parallel = &mut self.parallels[index];
        parallel.print_run = parallel.print_run.or(print_run);
        parallel.cards.push(card);
    }

    fn finish(self) -> ParsedSet {
        let mut set = self.set;
        let base_numbers: Vec<&str> = set
            .base_cards
            .iter()
            .map(|card| card.card_number.as_str())
            .collect();

        let parallels: Vec<ParsedParallel> = self
            .parallels
            .into_iter()
            .map(|builder| {
                let mirrors = builder
                    .cards
                    .iter()
                    .map(|card| card.card_number.as_str())
                    .eq(base_numbers.iter().copied());
                ParsedParallel {
                    name: builder.name,
                    print_run: builder.print_run,
                    cards: (!mirrors).then_some(builder.cards),
                }
            })
            .collect();

        set.parallels = parallels;
        set
    }
}

/// Parses a CSV checklist export into one set per base set.
///
/// The header row must name the set, card number, player and team columns;
/// a print run column is optional. Rows that cannot be read, or that lack a
/// set name, card number or player, are skipped with a warning.
///
/// # Errors
///
/// [`ParseError::MissingColumn`] when a required header is absent,
/// [`ParseError::Csv`] when the header row cannot be read.
///
/// # Examples
///
/// ```
/// use checklist_catalog::Resolver;
/// use checklist_parser::parse_checklist_csv;
///
/// let csv = "\
/// Set,Card #,Player,Team,Print Run
/// Optic,1,Jude Bellingham,Real Madrid,
/// Optic,2,Lamine Yamal,Barcelona,
/// Optic Gold,1,Jude Bellingham,Real Madrid,10
/// Optic Gold,2,Lamine Yamal,Barcelona,10
/// ";
///
/// let sets = parse_checklist_csv(csv, Resolver::builtin()).unwrap();
/// assert_eq!(sets.len(), 1);
/// assert_eq!(sets[0].set_name, "Optic");
/// assert_eq!(sets[0].parallels[0].name, "Gold");
/// assert_eq!(sets[0].parallels[0].print_run, Some(10));
/// assert!(sets[0].parallels[0].cards.is_none());
/// ```
pub fn parse_checklist_csv(content: &str, resolver: &Resolver) -> Result<Vec<ParsedSet>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = Columns::locate(reader.headers()?)?;
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut builders: Vec<SetBuilder> = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed checklist CSV row: {e}");
                continue;
            }
        };
        let Some(row) = columns.read(&record) else {
            warn!(
                line = record.position().map(|p| p.line()),
                "Skipping checklist CSV row without set, card number or player"
            );
            continue;
        };

        let relationship = resolver.infer(row.set_name, InferenceMode::Name);
        let print_run = row.print_run.or(relationship.print_run);
        let card = ParsedCard {
            card_number: row.card_number.to_string(),
            player_name: row.player_name.to_string(),
            team: row.team.to_string(),
            print_run,
        };

        let slot = *index.entry(relationship.base.clone()).or_insert_with(|| {
            debug!(base = %relationship.base, "New set in checklist CSV");
            builders.push(SetBuilder::new(&relationship.base));
            builders.len() - 1
        });
        match &relationship.variant {
            Some(variant) => builders[slot].add_parallel_card(variant, print_run, card),
            None => builders[slot].add_base_card(card),
        }
    }

    Ok(builders.into_iter().map(SetBuilder::finish).collect())
}
