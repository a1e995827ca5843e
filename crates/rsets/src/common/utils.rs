use std::fmt::Display;

pub fn format_comma_delimited<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Division rounded towards positive infinity, `0` if the divisor is zero.
#[inline]
pub fn div_round_up(value: u32, divisor: u32) -> u32 {
    if divisor == 0 {
        0
    } else {
        value.div_ceil(divisor)
    }
}
