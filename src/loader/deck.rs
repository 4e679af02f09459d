//! The fixed card catalog
//!
//! Every match is played with the same 110-card multiset. Card IDs are
//! assigned in catalog order, so ID `n` always names the same card.

use crate::core::{ActionKind, Card, CardCatalog, CardId, Color};

/// Total number of cards in the catalog
pub const CATALOG_SIZE: usize = 110;

/// Printable description of one kind of card, without an ID
#[derive(Debug, Clone, Copy)]
pub enum CardTemplate {
    Property(Color),
    Wildcard { value: u32, colors: &'static [Color] },
    Money(u32),
    Action { kind: ActionKind, value: u32 },
    Rent { colors: &'static [Color], value: u32 },
}

/// One catalog line: a template and how many copies it has
#[derive(Debug, Clone, Copy)]
pub struct DeckEntry {
    pub name: &'static str,
    pub count: u8,
    pub template: CardTemplate,
}

impl DeckEntry {
    const fn new(name: &'static str, count: u8, template: CardTemplate) -> Self {
        DeckEntry { name, count, template }
    }

    pub fn instantiate(&self, id: CardId) -> Card {
        match self.template {
            CardTemplate::Property(color) => Card::property(id, self.name, color),
            CardTemplate::Wildcard { value, colors } => Card::wildcard(id, self.name, value, colors),
            CardTemplate::Money(value) => Card::money(id, value),
            CardTemplate::Action { kind, value } => Card::action(id, self.name, value, kind),
            CardTemplate::Rent { colors, value } => {
                let wild = colors.len() == Color::ALL.len();
                Card::rent(id, self.name, value, colors, wild)
            }
        }
    }
}

const ANY_COLOR: &[Color] = &Color::ALL;

use CardTemplate::{Action, Money, Property, Rent, Wildcard};

const PROPERTIES: &[DeckEntry] = &[
    DeckEntry::new("Mediterranean Avenue", 1, Property(Color::Brown)),
    DeckEntry::new("Baltic Avenue", 1, Property(Color::Brown)),
    DeckEntry::new("Park Place", 1, Property(Color::DarkBlue)),
    DeckEntry::new("Boardwalk", 1, Property(Color::DarkBlue)),
    DeckEntry::new("Pacific Avenue", 1, Property(Color::Green)),
    DeckEntry::new("North Carolina Avenue", 1, Property(Color::Green)),
    DeckEntry::new("Pennsylvania Avenue", 1, Property(Color::Green)),
    DeckEntry::new("Oriental Avenue", 1, Property(Color::LightBlue)),
    DeckEntry::new("Vermont Avenue", 1, Property(Color::LightBlue)),
    DeckEntry::new("Connecticut Avenue", 1, Property(Color::LightBlue)),
    DeckEntry::new("St. James Place", 1, Property(Color::Orange)),
    DeckEntry::new("Tennessee Avenue", 1, Property(Color::Orange)),
    DeckEntry::new("New York Avenue", 1, Property(Color::Orange)),
    DeckEntry::new("St. Charles Place", 1, Property(Color::Pink)),
    DeckEntry::new("States Avenue", 1, Property(Color::Pink)),
    DeckEntry::new("Virginia Avenue", 1, Property(Color::Pink)),
    DeckEntry::new("Kentucky Avenue", 1, Property(Color::Red)),
    DeckEntry::new("Indiana Avenue", 1, Property(Color::Red)),
    DeckEntry::new("Illinois Avenue", 1, Property(Color::Red)),
    DeckEntry::new("Atlantic Avenue", 1, Property(Color::Yellow)),
    DeckEntry::new("Ventnor Avenue", 1, Property(Color::Yellow)),
    DeckEntry::new("Marvin Gardens", 1, Property(Color::Yellow)),
    DeckEntry::new("Reading Railroad", 1, Property(Color::Railroad)),
    DeckEntry::new("Pennsylvania Railroad", 1, Property(Color::Railroad)),
    DeckEntry::new("B. & O. Railroad", 1, Property(Color::Railroad)),
    DeckEntry::new("Short Line", 1, Property(Color::Railroad)),
    DeckEntry::new("Electric Company", 1, Property(Color::Utility)),
    DeckEntry::new("Water Works", 1, Property(Color::Utility)),
];

const WILDCARDS: &[DeckEntry] = &[
    DeckEntry::new("Property Wild Card", 2, Wildcard { value: 0, colors: ANY_COLOR }),
    DeckEntry::new(
        "Dark Blue / Green Wild Card",
        1,
        Wildcard { value: 4, colors: &[Color::DarkBlue, Color::Green] },
    ),
    DeckEntry::new(
        "Green / Railroad Wild Card",
        1,
        Wildcard { value: 4, colors: &[Color::Green, Color::Railroad] },
    ),
    DeckEntry::new(
        "Utility / Railroad Wild Card",
        1,
        Wildcard { value: 2, colors: &[Color::Utility, Color::Railroad] },
    ),
    DeckEntry::new(
        "Light Blue / Railroad Wild Card",
        1,
        Wildcard { value: 4, colors: &[Color::LightBlue, Color::Railroad] },
    ),
    DeckEntry::new(
        "Light Blue / Brown Wild Card",
        1,
        Wildcard { value: 1, colors: &[Color::LightBlue, Color::Brown] },
    ),
    DeckEntry::new(
        "Pink / Orange Wild Card",
        2,
        Wildcard { value: 2, colors: &[Color::Pink, Color::Orange] },
    ),
    DeckEntry::new(
        "Red / Yellow Wild Card",
        2,
        Wildcard { value: 3, colors: &[Color::Red, Color::Yellow] },
    ),
];

const MONEY: &[DeckEntry] = &[
    DeckEntry::new("1M", 10, Money(1)),
    DeckEntry::new("2M", 5, Money(2)),
    DeckEntry::new("3M", 3, Money(3)),
    DeckEntry::new("4M", 3, Money(4)),
    DeckEntry::new("5M", 2, Money(5)),
    DeckEntry::new("10M", 1, Money(10)),
];

const ACTIONS: &[DeckEntry] = &[
    DeckEntry::new("Pass Go", 10, Action { kind: ActionKind::DrawTwo, value: 1 }),
    DeckEntry::new("It's My Birthday", 3, Action { kind: ActionKind::CollectFromAll, value: 2 }),
    DeckEntry::new("Debt Collector", 3, Action { kind: ActionKind::CollectFromOne, value: 3 }),
    DeckEntry::new("Sly Deal", 3, Action { kind: ActionKind::StealOneProperty, value: 3 }),
    DeckEntry::new("Forced Deal", 3, Action { kind: ActionKind::SwapProperties, value: 3 }),
    DeckEntry::new("Deal Breaker", 2, Action { kind: ActionKind::StealCompleteSet, value: 5 }),
    DeckEntry::new("House", 3, Action { kind: ActionKind::AddHouse, value: 3 }),
    DeckEntry::new("Hotel", 2, Action { kind: ActionKind::AddHotel, value: 4 }),
    DeckEntry::new("Double The Rent", 2, Action { kind: ActionKind::DoubleRent, value: 1 }),
    DeckEntry::new("Just Say No", 3, Action { kind: ActionKind::RefuseAction, value: 4 }),
];

const RENTS: &[DeckEntry] = &[
    DeckEntry::new("Rent: Brown / Light Blue", 2, Rent { colors: &[Color::Brown, Color::LightBlue], value: 1 }),
    DeckEntry::new("Rent: Pink / Orange", 2, Rent { colors: &[Color::Pink, Color::Orange], value: 1 }),
    DeckEntry::new("Rent: Red / Yellow", 2, Rent { colors: &[Color::Red, Color::Yellow], value: 1 }),
    DeckEntry::new("Rent: Dark Blue / Green", 2, Rent { colors: &[Color::DarkBlue, Color::Green], value: 1 }),
    DeckEntry::new("Rent: Railroad / Utility", 2, Rent { colors: &[Color::Railroad, Color::Utility], value: 1 }),
    DeckEntry::new("Wild Rent", 3, Rent { colors: ANY_COLOR, value: 3 }),
];

/// Deck composition grouped by card category
pub struct DeckList;

impl DeckList {
    pub fn entries() -> impl Iterator<Item = &'static DeckEntry> {
        PROPERTIES
            .iter()
            .chain(WILDCARDS)
            .chain(MONEY)
            .chain(ACTIONS)
            .chain(RENTS)
    }

    pub fn total_cards() -> usize {
        Self::entries().map(|e| e.count as usize).sum()
    }

    /// Instantiate every card, assigning IDs `0..CATALOG_SIZE` in catalog order
    pub fn build_catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        let mut next_id = 0;
        for entry in Self::entries() {
            for _ in 0..entry.count {
                let id = CardId::new(next_id);
                next_id += 1;
                catalog.insert(id, entry.instantiate(id));
            }
        }
        catalog
    }
}
