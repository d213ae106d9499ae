//! Lenient parsing helpers that fall back to a default instead of failing.
//!
//! Configuration arrives from files, environment variables and other untyped
//! sources. These helpers never propagate an error: malformed input produces
//! the supplied default (or a zero vector), which is the right behavior for
//! tuning values that must always resolve to something usable.

use bevy::math::{Vec2, Vec3};
use std::str::FromStr;

/// Parses an `f32`, returning `default` on malformed input or NaN.
///
/// ```rust
/// use bevy_smooth_cam::parse::parse_f32;
///
/// assert_eq!(parse_f32("2.5", 0.0), 2.5);
/// assert_eq!(parse_f32(" 2.5 ", 0.0), 2.5);
/// assert_eq!(parse_f32("fast", 1.0), 1.0);
/// assert_eq!(parse_f32("NaN", 1.0), 1.0);
/// ```
#[must_use]
pub fn parse_f32(raw: &str, default: f32) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(number) if !number.is_nan() => number,
        _ => default,
    }
}

/// Parses an `f64`, returning `default` on malformed input or NaN.
#[must_use]
pub fn parse_f64(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(number) if !number.is_nan() => number,
        _ => default,
    }
}

/// Parses an `i32`, returning `default` on malformed input.
#[must_use]
pub fn parse_i32(raw: &str, default: i32) -> i32 {
    raw.trim().parse().unwrap_or(default)
}

/// Parses an `i64`, returning `default` on malformed input.
#[must_use]
pub fn parse_i64(raw: &str, default: i64) -> i64 {
    raw.trim().parse().unwrap_or(default)
}

/// Parses a boolean out of loosely formatted input.
///
/// Accepts anything starting with `y` or `1`, and the word `true`, in any
/// case. Everything else, including empty input, yields `default`.
///
/// ```rust
/// use bevy_smooth_cam::parse::parse_bool;
///
/// assert!(parse_bool("yes", false));
/// assert!(parse_bool("1", false));
/// assert!(parse_bool("True", false));
/// assert!(!parse_bool("no", false));
/// assert!(parse_bool("", true));
/// ```
#[must_use]
pub fn parse_bool(raw: &str, default: bool) -> bool {
    let lowered = raw.trim().to_lowercase();
    let Some(first) = lowered.chars().next() else {
        return default;
    };
    matches!(first, 'y' | '1') || lowered == "true"
}

/// Parses any [`FromStr`] type, returning `default` on malformed input.
#[must_use]
pub fn parse_or<T: FromStr>(raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or(default)
}

/// Parses a `"x,y"` pair into a [`Vec2`].
///
/// Anything other than exactly two components yields [`Vec2::ZERO`];
/// malformed components fall back to zero individually.
///
/// ```rust
/// use bevy::math::Vec2;
/// use bevy_smooth_cam::parse::parse_vec2;
///
/// assert_eq!(parse_vec2("1.5,-2"), Vec2::new(1.5, -2.0));
/// assert_eq!(parse_vec2("1.5"), Vec2::ZERO);
/// assert_eq!(parse_vec2(""), Vec2::ZERO);
/// ```
#[must_use]
pub fn parse_vec2(raw: &str) -> Vec2 {
    let mut tokens = raw.split(',');
    let (Some(x), Some(y), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Vec2::ZERO;
    };
    Vec2::new(parse_f32(x, 0.0), parse_f32(y, 0.0))
}

/// Parses a `"x,y,z"` triple into a [`Vec3`].
///
/// Anything other than exactly three components yields [`Vec3::ZERO`];
/// malformed components fall back to zero individually.
#[must_use]
pub fn parse_vec3(raw: &str) -> Vec3 {
    let mut tokens = raw.split(',');
    let (Some(x), Some(y), Some(z), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Vec3::ZERO;
    };
    Vec3::new(
        parse_f32(x, 0.0),
        parse_f32(y, 0.0),
        parse_f32(z, 0.0),
    )
}
