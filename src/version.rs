// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Version of this library as published.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_semver() {
        let version = get_version();
        assert_eq!(version.split('.').count(), 3, "unexpected version '{}'", version);
        assert!(version.split('.').all(|part| part.parse::<u64>().is_ok()));
    }
}
