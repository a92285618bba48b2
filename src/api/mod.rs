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

//! Built-in word tables, one module per value family.

mod boolean;
mod date;
mod month;
mod number;
mod quote;
mod record;
mod string;
mod time;
mod utils;
mod vector;
mod weekday;

use crate::quote::NativeFn;

/// A table of word names and their native implementations.
pub type WordTable = &'static [(&'static str, NativeFn)];

/// All built-in word tables, in dictionary loading order.
#[must_use]
pub fn tables() -> [WordTable; 11] {
    [
        utils::WORDS,
        boolean::WORDS,
        date::WORDS,
        month::WORDS,
        number::WORDS,
        quote::WORDS,
        record::WORDS,
        string::WORDS,
        time::WORDS,
        vector::WORDS,
        weekday::WORDS,
    ]
}
