//! Order notation.
//!
//! Orders are written `FACTION UNIT TERRITORY TYPE: TARGETS`, for example
//! `UK F NTH M: PIC` or `DE A MUN S: KIE BER`. Tokens are case-insensitive.
//! The faction may be omitted, or written `-`, to accept a unit of any
//! faction. Order types are `H`old, `M`ove (or `A`ttack), `S`upport and
//! `C`onvoy.

use thiserror::Error;

use crate::board::{Order, OrderError, OrderType, OrderUnit, TerritoryId, UnitKind};
use crate::variant::Variant;

/// Errors that can occur when parsing an order string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderParseError {
    #[error("empty input")]
    EmptyInput,

    #[error("missing ':' after the order type in '{0}'")]
    MissingColon(String),

    #[error("expected '[FACTION] UNIT TERRITORY TYPE' before ':', found '{0}'")]
    MalformedHead(String),

    #[error("unknown faction '{0}'")]
    UnknownFaction(String),

    #[error("unknown unit type '{0}'")]
    UnknownUnit(String),

    #[error("unknown territory '{0}'")]
    UnknownTerritory(String),

    #[error("unknown order type '{0}'")]
    UnknownOrderType(String),

    #[error(transparent)]
    Malformed(#[from] OrderError),
}

fn territory(variant: &Variant, token: &str) -> Result<TerritoryId, OrderParseError> {
    variant
        .map
        .lookup(token)
        .ok_or_else(|| OrderParseError::UnknownTerritory(token.to_uppercase()))
}

/// Parses one order against a variant's territories and factions.
pub fn parse_order(s: &str, variant: &Variant) -> Result<Order, OrderParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(OrderParseError::EmptyInput);
    }

    let (head, tail) = s
        .split_once(':')
        .ok_or_else(|| OrderParseError::MissingColon(s.to_string()))?;

    let tokens: Vec<&str> = head.split_whitespace().collect();
    let (faction_token, unit_token, territory_token, type_token) = match tokens.as_slice() {
        [unit, terr, ty] => (None, *unit, *terr, *ty),
        [faction, unit, terr, ty] => (Some(*faction), *unit, *terr, *ty),
        _ => return Err(OrderParseError::MalformedHead(head.trim().to_string())),
    };

    let faction = match faction_token {
        None | Some("-") => None,
        Some(code) => Some(
            variant
                .factions
                .lookup(code)
                .ok_or_else(|| OrderParseError::UnknownFaction(code.to_uppercase()))?,
        ),
    };

    let kind = UnitKind::from_token(unit_token)
        .ok_or_else(|| OrderParseError::UnknownUnit(unit_token.to_string()))?;

    let order_type = {
        let mut chars = type_token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => OrderType::from_letter(c),
            _ => None,
        }
    }
    .ok_or_else(|| OrderParseError::UnknownOrderType(type_token.to_string()))?;

    let unit = OrderUnit {
        faction,
        kind,
        territory: territory(variant, territory_token)?,
    };

    let targets = tail
        .split_whitespace()
        .map(|t| territory(variant, t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Order::from_targets(unit, order_type, &targets)?)
}

/// Formats an order in canonical notation with uppercase codes.
pub fn format_order(order: &Order, variant: &Variant) -> String {
    let unit = order.unit();
    let code = |id: TerritoryId| variant.map.code(id).to_uppercase();

    let mut out = String::new();
    if let Some(faction) = unit.faction.and_then(|f| variant.factions.faction(f)) {
        out.push_str(&faction.code.to_uppercase());
        out.push(' ');
    }
    out.push(unit.kind.letter());
    out.push(' ');
    out.push_str(&code(unit.territory));
    out.push(' ');
    out.push(order.order_type().letter());
    out.push(':');
    for target in order.targets() {
        out.push(' ');
        out.push_str(&code(target));
    }
    out
}
