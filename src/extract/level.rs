//! Level markers embedded in object names
//!
//! An object named `Branch_L3` sits at level 3. The first `_L<digits>`
//! occurrence in the name wins.

use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use nom::sequence::preceded;
use nom::{IResult, Parser};

use crate::core::types::Level;

fn level_marker(input: &str) -> IResult<&str, &str> {
    preceded(tag("_L"), digit1).parse(input)
}

/// Digits of the first level marker in `name`, if any
pub fn find_level_marker(name: &str) -> Option<&str> {
    name.match_indices("_L")
        .find_map(|(start, _)| level_marker(&name[start..]).ok().map(|(_, digits)| digits))
}

/// Level encoded in an object name
///
/// Returns `None` when the name carries no marker or when the first
/// marker does not fit a level number.
pub fn parse_level(name: &str) -> Option<Level> {
    find_level_marker(name)?.parse().ok().map(Level)
}
