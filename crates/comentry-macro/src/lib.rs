//! Procedural macros for comentry
//!
//! Provides:
//! - `guid!("xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx")` - a `comentry::GUID` constant expression
//!
//! The literal is parsed at compile time, so a typo in a well-known interface ID
//! is a build error at the literal instead of a runtime parse failure.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Returns the path to the comentry crate.
///
/// The comentry crate declares `extern crate self as comentry`, so the same
/// absolute path works from inside the crate and from its dependents.
fn crate_path() -> TokenStream2 {
    quote! { ::comentry }
}

// =============================================================================
// GUID literal parsing
// =============================================================================

/// Parse a GUID string in format "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
/// (optionally wrapped in braces). Returns (data1, data2, data3, data4).
fn parse_guid_string(s: &str) -> Result<(u32, u16, u16, [u8; 8]), String> {
    let s = s.trim();
    let s = s
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(s);

    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 5 {
        return Err(format!(
            "Invalid GUID format: expected 'xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx', got '{}'",
            s
        ));
    }

    let expected = [8, 4, 4, 4, 12];
    for (part, len) in parts.iter().zip(expected) {
        if part.len() != len || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!(
                "Invalid GUID group: expected {} hex chars, got '{}'",
                len, part
            ));
        }
    }

    let data1 = u32::from_str_radix(parts[0], 16)
        .map_err(|_| format!("Invalid GUID data1: '{}'", parts[0]))?;
    let data2 = u16::from_str_radix(parts[1], 16)
        .map_err(|_| format!("Invalid GUID data2: '{}'", parts[1]))?;
    let data3 = u16::from_str_radix(parts[2], 16)
        .map_err(|_| format!("Invalid GUID data3: '{}'", parts[2]))?;

    // parts[3] holds data4[0..2], parts[4] holds data4[2..8]
    let tail = format!("{}{}", parts[3], parts[4]);
    let mut data4 = [0u8; 8];
    for (i, byte) in data4.iter_mut().enumerate() {
        let pair = &tail[i * 2..i * 2 + 2];
        *byte = u8::from_str_radix(pair, 16)
            .map_err(|_| format!("Invalid GUID data4[{}]: '{}'", i, pair))?;
    }

    Ok((data1, data2, data3, data4))
}

/// Build a `comentry::GUID` from a string literal at compile time.
///
/// # Example
/// ```ignore
/// use comentry::{GUID, guid};
///
/// const IID_IDISPATCH: GUID = guid!("00020400-0000-0000-C000-000000000046");
/// ```
#[proc_macro]
pub fn guid(input: TokenStream) -> TokenStream {
    let literal = parse_macro_input!(input as LitStr);

    let (data1, data2, data3, data4) = match parse_guid_string(&literal.value()) {
        Ok(parsed) => parsed,
        Err(e) => {
            return syn::Error::new(literal.span(), e)
                .to_compile_error()
                .into();
        }
    };

    let krate = crate_path();
    let [b0, b1, b2, b3, b4, b5, b6, b7] = data4;
    quote! {
        #krate::GUID::new(
            #data1,
            #data2,
            #data3,
            [#b0, #b1, #b2, #b3, #b4, #b5, #b6, #b7],
        )
    }
    .into()
}
