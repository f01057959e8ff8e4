//! Order types.
//!
//! Each variant carries exactly the territories that order needs, so a
//! support without both endpoints cannot be expressed. Orders built from
//! loose target lists go through [`Order::from_targets`], which is where
//! malformed arity is reported.

use thiserror::Error;

use super::faction::FactionId;
use super::territory::TerritoryId;
use super::unit::UnitKind;

/// The acting unit: who claims it, what it is, and where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderUnit {
    /// `None` accepts a unit of any faction.
    pub faction: Option<FactionId>,
    pub kind: UnitKind,
    pub territory: TerritoryId,
}

impl OrderUnit {
    pub fn new(kind: UnitKind, territory: TerritoryId) -> Self {
        OrderUnit { faction: None, kind, territory }
    }

    pub fn of(faction: FactionId, kind: UnitKind, territory: TerritoryId) -> Self {
        OrderUnit { faction: Some(faction), kind, territory }
    }
}

/// Order type tag, as written in order notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    Hold,
    Move,
    Support,
    Convoy,
}

impl OrderType {
    /// Parses the notation letter. `A` (attack) is an alias for move.
    pub fn from_letter(c: char) -> Option<OrderType> {
        match c.to_ascii_uppercase() {
            'H' => Some(OrderType::Hold),
            'M' | 'A' => Some(OrderType::Move),
            'S' => Some(OrderType::Support),
            'C' => Some(OrderType::Convoy),
            _ => None,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            OrderType::Hold => 'H',
            OrderType::Move => 'M',
            OrderType::Support => 'S',
            OrderType::Convoy => 'C',
        }
    }
}

/// A structurally malformed order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("{order:?} order takes {expected} target(s), got {found}")]
    TargetCount {
        order: OrderType,
        expected: &'static str,
        found: usize,
    },

    #[error("{0:?} order with two targets must start from the unit's own territory")]
    SourceMismatch(OrderType),
}

/// A proposed action for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// `UK F LON H:`
    Hold { unit: OrderUnit },

    /// `UK F LON M: NTH`
    Move { unit: OrderUnit, dest: TerritoryId },

    /// `UK F NTH S: LON YOR` supports the unit in `from` into `to`.
    Support {
        unit: OrderUnit,
        from: TerritoryId,
        to: TerritoryId,
    },

    /// `UK F NTH C: LON NWY` carries the army in `from` to `to`.
    Convoy {
        unit: OrderUnit,
        from: TerritoryId,
        to: TerritoryId,
    },
}

impl Order {
    /// Builds an order from a loose target list.
    ///
    /// A hold accepts no target or its own territory. A move accepts its
    /// destination alone or preceded by its own territory. Supports and
    /// convoys need exactly two targets.
    pub fn from_targets(
        unit: OrderUnit,
        order_type: OrderType,
        targets: &[TerritoryId],
    ) -> Result<Order, OrderError> {
        let count_err = |expected| OrderError::TargetCount {
            order: order_type,
            expected,
            found: targets.len(),
        };

        match (order_type, targets) {
            (OrderType::Hold, []) => Ok(Order::Hold { unit }),
            (OrderType::Hold, [t]) if *t == unit.territory => Ok(Order::Hold { unit }),
            (OrderType::Hold, [_]) => Err(OrderError::SourceMismatch(order_type)),
            (OrderType::Hold, _) => Err(count_err("0 or 1")),

            (OrderType::Move, [dest]) => Ok(Order::Move { unit, dest: *dest }),
            (OrderType::Move, [src, dest]) if *src == unit.territory => {
                Ok(Order::Move { unit, dest: *dest })
            }
            (OrderType::Move, [_, _]) => Err(OrderError::SourceMismatch(order_type)),
            (OrderType::Move, _) => Err(count_err("1 or 2")),

            (OrderType::Support, [from, to]) => Ok(Order::Support { unit, from: *from, to: *to }),
            (OrderType::Support, _) => Err(count_err("2")),

            (OrderType::Convoy, [from, to]) => Ok(Order::Convoy { unit, from: *from, to: *to }),
            (OrderType::Convoy, _) => Err(count_err("2")),
        }
    }

    /// Returns the acting unit.
    pub const fn unit(&self) -> &OrderUnit {
        match self {
            Order::Hold { unit }
            | Order::Move { unit, .. }
            | Order::Support { unit, .. }
            | Order::Convoy { unit, .. } => unit,
        }
    }

    pub const fn order_type(&self) -> OrderType {
        match self {
            Order::Hold { .. } => OrderType::Hold,
            Order::Move { .. } => OrderType::Move,
            Order::Support { .. } => OrderType::Support,
            Order::Convoy { .. } => OrderType::Convoy,
        }
    }

    /// Returns the target list in notation order.
    pub fn targets(&self) -> Vec<TerritoryId> {
        match *self {
            Order::Hold { .. } => Vec::new(),
            Order::Move { dest, .. } => vec![dest],
            Order::Support { from, to, .. } | Order::Convoy { from, to, .. } => vec![from, to],
        }
    }
}
