// Kennywood
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! The `BaseUrls` type.

use crate::env::get_required_var;
use url::Url;

/// Common error message for URLs built via hardcoded values.
const URL_MUST_BE_VALID: &str = "URLs built in-process must be valid";

/// Checks if `base` has the right format to be a base URL and returns an error if it is not.
fn ensure_valid_base(base: &Url) -> Result<(), String> {
    match base.join("x") {
        Ok(joined) if joined.as_str().starts_with(base.as_str()) => Ok(()),
        Ok(_) => Err(format!("URL '{}' cannot be a base: missing trailing slash", base)),
        Err(e) => Err(format!("URL '{}' cannot be a base: {}", base, e)),
    }
}

/// Contains the base URL under which the service is reachable and allows building absolute URLs
/// to its resources.
///
/// Resources embed links to themselves in their representations, and these links must be
/// absolute URLs that clients can follow.  The service cannot guess its public address because it
/// may sit behind a proxy, so the base URL must be configured explicitly.
#[cfg_attr(test, derive(Debug, Eq, PartialEq))]
pub struct BaseUrls {
    /// The base URL to the backend service (ourselves).
    backend: Url,
}

impl BaseUrls {
    /// Creates a set of base URLs from an already-parsed URL.
    pub fn new(backend: Url) -> Result<Self, String> {
        ensure_valid_base(&backend)?;
        Ok(Self { backend })
    }

    /// Creates a set of base URLs from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use the `<prefix>_BACKEND_BASE_URL` variable.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let backend = get_required_var::<Url>(prefix, "BACKEND_BASE_URL")?;
        Self::new(backend)
    }

    /// Creates a set of base URLs from a fixed string, which must represent a valid URL.
    #[cfg(any(test, feature = "testutils"))]
    pub fn from_strs(backend: &'static str) -> Self {
        let backend = Url::parse(backend).unwrap();
        Self::new(backend).unwrap()
    }

    /// Generates a URL to the backend given a `path`, which must be relative.  The `path` can be
    /// empty to obtain a reference to the root.
    pub fn make_backend_url(&self, path: &str) -> Url {
        assert!(!path.starts_with('/'));
        self.backend.join(path).expect(URL_MUST_BE_VALID)
    }
}
