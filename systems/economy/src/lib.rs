#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Proximity-gated purchases against the map's door and shop stations.

use std::fmt;

use glam::Vec2;
use last_stand_core::{Command, EconomyTuning, GridMap, PurchaseOffer};

/// Configuration parameters required to construct the economy resolver.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    tuning: EconomyTuning,
}

impl Config {
    /// Creates a new configuration from the economy tuning.
    #[must_use]
    pub const fn new(tuning: EconomyTuning) -> Self {
        Self { tuning }
    }
}

/// Purchase opportunity currently within reach of the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionPrompt {
    offer: PurchaseOffer,
    cost: u32,
    label: &'static str,
}

impl InteractionPrompt {
    /// Item that interacting would purchase.
    #[must_use]
    pub const fn offer(&self) -> PurchaseOffer {
        self.offer
    }

    /// Price of the item.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl fmt::Display for InteractionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offer {
            PurchaseOffer::Door => write!(f, "Press E to open door ({})", self.cost),
            PurchaseOffer::Station(_) => {
                write!(f, "Press E to buy {} ({})", self.label, self.cost)
            }
        }
    }
}

/// Pure system that resolves interaction requests into purchase commands.
#[derive(Debug)]
pub struct Economy {
    interact_range: f32,
}

impl Economy {
    /// Creates a new economy resolver using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interact_range: config.tuning.interact_range,
        }
    }

    /// Finds the single purchase available from `position`.
    ///
    /// A closed door, measured to its cell centre, takes precedence; otherwise
    /// the first station in map order that is in range is offered.
    #[must_use]
    pub fn prompt(&self, position: Vec2, map: &GridMap) -> Option<InteractionPrompt> {
        if let Some(door) = map.door() {
            if !door.is_open() && position.distance(door.centre()) < self.interact_range {
                return Some(InteractionPrompt {
                    offer: PurchaseOffer::Door,
                    cost: door.cost(),
                    label: "door",
                });
            }
        }

        map.stations()
            .iter()
            .find(|station| position.distance(station.position()) < self.interact_range)
            .map(|station| InteractionPrompt {
                offer: PurchaseOffer::Station(station.id()),
                cost: station.cost(),
                label: station.kind().label(),
            })
    }

    /// Emits a purchase for the available opportunity when the player interacts.
    pub fn handle(&self, interact: bool, position: Vec2, map: &GridMap, out: &mut Vec<Command>) {
        if !interact {
            return;
        }

        if let Some(prompt) = self.prompt(position, map) {
            out.push(Command::Purchase {
                offer: prompt.offer,
            });
        }
    }
}
