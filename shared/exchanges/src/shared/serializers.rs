use common::functions::format_price;
use serde::Serializer;

/// Quantities and rates go on the wire as fixed 8-decimal strings; the
/// default float formatting switches to exponent notation for small values.
pub fn f64_as_fixed_string<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_price(*value))
}
