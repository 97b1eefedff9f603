// Dweve Kaplang - Type and Method Definition Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Writer configuration.

/// Indentation used for enum values and properties.
///
/// ```
/// use kaplang_c14n::{CanonicalConfig, Indentation};
///
/// let config = CanonicalConfig::new().with_indentation(Indentation::Spaces(4));
/// assert_eq!(config.indentation.unit(), "    ");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indentation {
    /// One tab per level (canonical).
    #[default]
    Tabs,
    /// The given number of spaces per level.
    Spaces(usize),
}

impl Indentation {
    /// The string written for one level.
    pub fn unit(&self) -> String {
        match self {
            Indentation::Tabs => "\t".to_string(),
            Indentation::Spaces(n) => " ".repeat(*n),
        }
    }
}

/// Configuration for canonical output.
///
/// The default is the canonical form; other settings only change
/// whitespace, so every configuration parses back to the same entities.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalConfig {
    /// Indentation for nested lines. Default: [`Indentation::Tabs`]
    pub indentation: Indentation,
}

impl CanonicalConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = indentation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tabs() {
        assert_eq!(CanonicalConfig::default().indentation, Indentation::Tabs);
        assert_eq!(Indentation::Tabs.unit(), "\t");
        assert_eq!(Indentation::Spaces(2).unit(), "  ");
    }
}
