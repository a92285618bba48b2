// Copyright 2025 Rauli Laine
//
// This file is part of laskin.
//
// laskin is free software: you can redistribute it and/or modify it under the
// terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// laskin is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// laskin. If not, see <https://www.gnu.org/licenses/>.

//! Catalog of measurement units.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Physical quantity measured by a unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Quantity {
    Length,
    Mass,
    Time,
}

impl Quantity {
    /// Lower case name of the quantity, as used in error messages and by
    /// `number:unit-type`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Quantity::Length => "length",
            Quantity::Mass => "mass",
            Quantity::Time => "time",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A measurement unit: a quantity, a symbol and a multiplier relative to the
/// base unit of the quantity.
///
/// A positive multiplier means one of this unit equals that many base units;
/// a negative multiplier `-k` means `k` of this unit equal one base unit. The
/// base unit itself has multiplier 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Unit {
    quantity: Quantity,
    symbol: &'static str,
    multiplier: i64,
}

impl Unit {
    const fn new(quantity: Quantity, symbol: &'static str, multiplier: i64) -> Unit {
        Unit {
            quantity,
            symbol,
            multiplier,
        }
    }

    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    #[must_use]
    pub fn multiplier(&self) -> i64 {
        self.multiplier
    }

    /// Returns true if this is the base unit of its quantity.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.multiplier == 1
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

// Supported length units.
pub const MILLIMETER: Unit = Unit::new(Quantity::Length, "mm", -1000);
pub const CENTIMETER: Unit = Unit::new(Quantity::Length, "cm", -100);
pub const METER: Unit = Unit::new(Quantity::Length, "m", 1);
pub const KILOMETER: Unit = Unit::new(Quantity::Length, "km", 1000);

// Supported mass units.
pub const MILLIGRAM: Unit = Unit::new(Quantity::Mass, "mg", -1_000_000);
pub const GRAM: Unit = Unit::new(Quantity::Mass, "g", -1000);
pub const KILOGRAM: Unit = Unit::new(Quantity::Mass, "kg", 1);

// Supported time units.
pub const MILLISECOND: Unit = Unit::new(Quantity::Time, "ms", -1000);
pub const SECOND: Unit = Unit::new(Quantity::Time, "s", 1);
pub const MINUTE: Unit = Unit::new(Quantity::Time, "min", 60);
pub const HOUR: Unit = Unit::new(Quantity::Time, "h", 3600);
pub const DAY: Unit = Unit::new(Quantity::Time, "d", 86400);

static SYMBOL_MAPPING: Lazy<HashMap<&'static str, Unit>> = Lazy::new(|| {
    let mut mapping = HashMap::new();

    for unit in ALL_LENGTH_UNITS
        .iter()
        .chain(ALL_MASS_UNITS)
        .chain(ALL_TIME_UNITS)
    {
        mapping.insert(unit.symbol(), *unit);
    }

    mapping
});

// Unit lists in descending multiplier order, as consumed by the
// renormalization step after arithmetic.
static ALL_LENGTH_UNITS: &[Unit] = &[KILOMETER, METER, CENTIMETER, MILLIMETER];
static ALL_MASS_UNITS: &[Unit] = &[KILOGRAM, GRAM, MILLIGRAM];
static ALL_TIME_UNITS: &[Unit] = &[DAY, HOUR, MINUTE, SECOND, MILLISECOND];

/// Looks up a unit by its symbol.
#[must_use]
pub fn find_by_symbol(symbol: &str) -> Option<Unit> {
    SYMBOL_MAPPING.get(symbol).copied()
}

/// Returns the base unit of the given quantity.
#[must_use]
pub fn base_unit_of(quantity: Quantity) -> Unit {
    match quantity {
        Quantity::Length => METER,
        Quantity::Mass => KILOGRAM,
        Quantity::Time => SECOND,
    }
}

/// Returns all units of the given quantity, in descending multiplier order.
#[must_use]
pub fn all_units_of(quantity: Quantity) -> &'static [Unit] {
    match quantity {
        Quantity::Length => ALL_LENGTH_UNITS,
        Quantity::Mass => ALL_MASS_UNITS,
        Quantity::Time => ALL_TIME_UNITS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_symbol_known() {
        let u = find_by_symbol("km").unwrap();
        assert_eq!(u.quantity(), Quantity::Length);
        assert_eq!(u.multiplier(), 1000);
    }

    #[test]
    fn find_by_symbol_unknown() {
        assert!(find_by_symbol("furlong").is_none());
    }

    #[test]
    fn exactly_one_base_unit_per_quantity() {
        for quantity in [Quantity::Length, Quantity::Mass, Quantity::Time] {
            let bases = all_units_of(quantity)
                .iter()
                .filter(|u| u.is_base())
                .count();
            assert_eq!(bases, 1);
            assert!(base_unit_of(quantity).is_base());
        }
    }

    #[test]
    fn unit_lists_are_descending() {
        for quantity in [Quantity::Length, Quantity::Mass, Quantity::Time] {
            let units = all_units_of(quantity);
            for pair in units.windows(2) {
                assert!(pair[0].multiplier() > pair[1].multiplier());
            }
        }
    }
}
