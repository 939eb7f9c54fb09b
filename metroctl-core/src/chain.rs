//! Ordered section chain for one line.
//!
//! A line's sections form a single connected path: each section's up
//! station equals the previous section's down station. Mutation is
//! tail-only — new sections append at the current terminal, and only the
//! last section can be removed. Mid-chain insert/remove is deliberately
//! unsupported; there is no splicing, re-linking, or distance rebalancing.

use crate::error::SectionError;
use crate::section::Section;

/// The ordered section list of a line, with invariant-checked mutation.
///
/// Every mutation validates against the current state before touching the
/// list, so a failed call leaves the chain exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionChain {
    sections: Vec<Section>,
}

impl SectionChain {
    /// Empty chain. Only valid as a staging state while bootstrapping a
    /// line; a persisted line always holds at least one section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a chain from already-ordered sections (e.g. loaded from
    /// storage in position order).
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The station sequence implied by the sections: each section's up
    /// station in order, then the final section's down station.
    ///
    /// For any valid chain, `stations().len() == len() + 1` and the
    /// sequence contains no duplicates.
    pub fn stations(&self) -> Vec<i64> {
        let mut stations: Vec<i64> = self.sections.iter().map(|s| s.up_station).collect();
        if let Some(last) = self.sections.last() {
            stations.push(last.down_station);
        }
        stations
    }

    /// Down station of the last section, if any.
    pub fn terminal(&self) -> Option<i64> {
        self.sections.last().map(|s| s.down_station)
    }

    /// Append a section at the tail.
    ///
    /// An empty chain accepts any section (line bootstrap). Otherwise the
    /// section's up station must be the current terminal, and its down
    /// station must not already appear on the line.
    pub fn add(&mut self, section: Section) -> Result<(), SectionError> {
        if let Some(terminal) = self.terminal() {
            if section.up_station != terminal {
                return Err(SectionError::NotTerminalUpStation {
                    up_station: section.up_station,
                    terminal,
                });
            }

            if self.contains_station(section.down_station) {
                return Err(SectionError::DuplicateStation {
                    station: section.down_station,
                });
            }
        }

        self.sections.push(section);
        Ok(())
    }

    /// Remove the last section, addressed by its down station.
    ///
    /// Only the terminal station's section may be removed, and a chain is
    /// never reduced below one section. Returns the removed section.
    pub fn remove(&mut self, station: i64) -> Result<Section, SectionError> {
        let terminal = self.terminal().ok_or(SectionError::EmptyChain)?;

        if !self.contains_station(station) {
            return Err(SectionError::StationNotFound { station });
        }

        if station != terminal {
            return Err(SectionError::NotTerminalStation { station });
        }

        if self.sections.len() == 1 {
            return Err(SectionError::LastRemainingSection);
        }

        // len >= 2 checked above
        Ok(self.sections.pop().expect("chain is non-empty"))
    }

    fn contains_station(&self, station: i64) -> bool {
        self.stations().contains(&station)
    }
}
