//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named regex source strings, for callers who want a common pattern
//! without writing it out by hand. Plain `&str` constants; the core never
//! imports any meaning from this module, and nothing in
//! [`crate::generator`] depends on it.

/// Matches a version-4 UUID in canonical hyphenated lowercase-hex form,
/// e.g. `"f47ac10b-58cc-4372-a567-0e02b2c3d479"`.
pub const UUID_V4: &str =
    r"[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}";

/// Matches an IPv4 address with each octet in `0..=255`, e.g. `"192.168.1.1"`.
pub const IPV4: &str = r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

/// Matches a semantic version core plus optional pre-release and build
/// metadata, e.g. `"1.4.2-rc.1+build.9"`.
pub const SEMVER: &str = r"(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(-[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?(\+[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?";

/// Matches the local part of an email address (the part before the `@`):
/// one or more word characters or dots, never starting or ending with a
/// dot.
pub const EMAIL_LOCAL_PART: &str = r"\w[\w.]*\w|\w";

/// Matches a 3- or 6-digit hex color with a leading `#`, e.g. `"#a1b2c3"`.
pub const HEX_COLOR: &str = r"#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})";
