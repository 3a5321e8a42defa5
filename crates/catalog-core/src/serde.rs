// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::Serializer;
use rust_decimal::Decimal;

fn fixed_2(d: &Decimal) -> String {
    let mut rounded = d.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Serialize a `Decimal` as a string with exactly two fractional digits (`"25.00"`).
pub fn to_fixed_2<S>(d: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&fixed_2(d))
}

/// Like [`to_fixed_2`], `null` for `None`.
pub fn to_fixed_2_opt<S>(d: &Option<Decimal>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match d {
        Some(d) => s.serialize_str(&fixed_2(d)),
        None => s.serialize_none(),
    }
}
