//! Byte widths of semantic types (§4.5), in terms of the primitive sizes
//! `faxc-abi` defines.

use faxc_sem::Type;

/// `sizeof(ty)`. Panics on `Void`: a void-typed node never reaches the
/// explorer, since the type checker rejects every construct (variable
/// declarations, array elements, function parameters) that could carry
/// one through to here.
pub fn size_of(ty: &Type) -> i64 {
    match ty {
        Type::Int => faxc_abi::INT_SIZE,
        Type::Bool => faxc_abi::BOOL_SIZE,
        Type::String => faxc_abi::PTR_SIZE,
        Type::Func { .. } => faxc_abi::PTR_SIZE,
        Type::Array { len, elem } => len * size_of(elem),
        Type::Void => unreachable!("a void-typed node cannot reach the explorer"),
    }
}
