//! Sequenced writing of boot facts.

use crate::area::SharedArea;
use crate::config::BootConfig;
use crate::error::{ErrorKind, ShareError, ShareResult};
use crate::record::fact::BootFact;
use bootshare_storage::RetainedRegion;
use tracing::{debug, error};

/// Progress of a [`RecordWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// `n` facts have been written; the rest are still pending.
    Pending(usize),
    /// The fact at `index` failed; nothing after it was attempted.
    Failed {
        /// Position of the failing fact.
        index: usize,
        /// What went wrong.
        kind: ErrorKind,
    },
    /// Every fact was written.
    Done,
}

/// Writes an ordered list of boot facts into a [`SharedArea`].
///
/// Facts are appended in list order. The first failure stops the sequence
/// and is returned as is; there are no retries.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    facts: Vec<BootFact>,
    state: WriterState,
}

impl RecordWriter {
    /// Creates a writer for the given facts.
    #[must_use]
    pub fn new(facts: Vec<BootFact>) -> Self {
        Self {
            facts,
            state: WriterState::Pending(0),
        }
    }

    /// Creates a writer for the standard bootloader information facts.
    ///
    /// Order: mode, signature type, recovery, running slot, bootloader
    /// version, maximum application size.
    #[must_use]
    pub fn from_config(config: &BootConfig, running_slot: u32) -> Self {
        Self::new(vec![
            BootFact::Mode(config.mode),
            BootFact::SignatureType(config.signature_type),
            BootFact::Recovery(config.recovery),
            BootFact::RunningSlot(running_slot),
            BootFact::BootloaderVersion(config.bootloader_version),
            BootFact::MaxApplicationSize(config.max_image_size),
        ])
    }

    /// Adds a fact to the end of the list.
    ///
    /// Pushing onto a finished writer reopens it, so the next [`run`](Self::run)
    /// writes only the new facts.
    pub fn push(&mut self, fact: BootFact) {
        if self.state == WriterState::Done {
            self.state = WriterState::Pending(self.facts.len());
        }
        self.facts.push(fact);
    }

    /// Returns the facts in write order.
    #[must_use]
    pub fn facts(&self) -> &[BootFact] {
        &self.facts
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Writes every fact into `area`.
    ///
    /// Running a finished writer writes nothing.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`SharedArea::append`]. Once a
    /// fact has failed, every later run returns
    /// [`ShareError::RecordAborted`] without touching the area.
    pub fn run<R: RetainedRegion>(&mut self, area: &mut SharedArea<R>) -> ShareResult<()> {
        let start = match self.state {
            WriterState::Pending(start) => start,
            WriterState::Failed { index, kind } => {
                return Err(ShareError::RecordAborted { index, kind });
            }
            WriterState::Done => return Ok(()),
        };

        for (index, fact) in self.facts.iter().enumerate().skip(start) {
            if let Err(e) = area.append(fact.tlv_type(), &fact.encode()) {
                error!(fact = fact.name(), error = %e, "failed to record boot fact");
                self.state = WriterState::Failed {
                    index,
                    kind: e.kind(),
                };
                return Err(e);
            }
            self.state = WriterState::Pending(index + 1);
        }

        self.state = WriterState::Done;
        debug!(
            facts = self.facts.len(),
            written = area.written_size(),
            "boot record written"
        );
        Ok(())
    }
}

/// Records the standard bootloader information into `area`.
///
/// # Errors
///
/// Returns the first error reported by [`SharedArea::append`].
pub fn save_boot_info<R: RetainedRegion>(
    area: &mut SharedArea<R>,
    config: &BootConfig,
    running_slot: u32,
) -> ShareResult<()> {
    RecordWriter::from_config(config, running_slot).run(area)
}
