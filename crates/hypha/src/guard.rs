//! Layout-suspension discipline.
//!
//! The remote layout process may be continuously running; structural edits
//! must happen while it is paused, and a batch must pause/resume exactly once
//! no matter how many single-element operations it nests.

use crate::client::RendererClient;
use crate::error::Result;

/// Reentrant pause/resume counter for the remote layout process.
///
/// `stop_layout` is sent only on the 0→1 transition, `resume_layout` only on
/// 1→0. If a remote call fails mid-batch the depth is left as-is so the
/// half-applied state stays inspectable.
#[derive(Debug, Default)]
pub struct LayoutGate {
    depth: u32,
}

impl LayoutGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn acquire<C: RendererClient>(&mut self, client: &mut C) -> Result<()> {
        if self.depth == 0 {
            client.stop_layout()?;
        }
        self.depth += 1;
        Ok(())
    }

    /// Release one acquisition. Releasing at depth zero is a no-op.
    pub fn release<C: RendererClient>(&mut self, client: &mut C) -> Result<()> {
        match self.depth {
            0 => Ok(()),
            1 => {
                client.resume_layout()?;
                self.depth = 0;
                Ok(())
            }
            _ => {
                self.depth -= 1;
                Ok(())
            }
        }
    }
}
