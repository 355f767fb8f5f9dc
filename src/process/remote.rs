//! The attachment lifecycle and the live memory capability

use super::handle::ProcessHandle;
use super::window::WindowHandle;
use super::{modules, privileges, snapshot, window};
use crate::core::types::{find_module, Address, MemoryError, MemoryResult, ModuleEntry, RegionInfo};
use crate::memory::{MemoryReader, MemoryWriter, ProcessMemory};
use tracing::{debug, info, warn};

/// Identity and capability bundle for the attached target.
///
/// Only ever constructed whole, so no partially-attached state is
/// observable. Memory access needs just the pid and the capability; the
/// window handle is identity confirmation and may legitimately be absent
/// for windowless targets.
#[derive(Debug)]
struct Attachment {
    pid: u32,
    window: Option<WindowHandle>,
    handle: ProcessHandle,
}

/// Safe accessor for one target process's memory.
///
/// Manages exactly one attachment at a time. Synchronous and
/// single-threaded by design: callers invoking it from multiple threads
/// must provide their own mutual exclusion.
#[derive(Debug, Default)]
pub struct RemoteProcess {
    attachment: Option<Attachment>,
}

impl RemoteProcess {
    pub fn new() -> Self {
        RemoteProcess { attachment: None }
    }

    /// True iff a target is attached with a valid capability. Pure query.
    pub fn is_attached(&self) -> bool {
        self.attachment
            .as_ref()
            .map_or(false, |a| a.handle.is_valid())
    }

    /// Attached target's process identifier.
    pub fn pid(&self) -> Option<u32> {
        self.attachment.as_ref().map(|a| a.pid)
    }

    /// Attached target's top-level window, when one was discovered.
    pub fn window(&self) -> Option<WindowHandle> {
        self.attachment.as_ref().and_then(|a| a.window)
    }

    /// Attaches to the process owning the top-level window titled `title`
    /// (exact match). A no-op while already attached.
    pub fn attach_by_window_title(&mut self, title: &str) -> MemoryResult<()> {
        if self.is_attached() {
            return Ok(());
        }
        Self::request_privileges();

        let win = window::find_by_title(title)?;
        let pid = window::owning_pid(win)?;
        let handle = ProcessHandle::open_all_access(pid)?;

        info!(pid, title, "attached by window title");
        self.attachment = Some(Attachment {
            pid,
            window: Some(win),
            handle,
        });
        Ok(())
    }

    /// Attaches to the first running process whose executable file name
    /// equals `name` exactly. Zero matches is not an error: the operation
    /// completes detached so a polling caller can retry until the target
    /// starts. A no-op while already attached.
    pub fn attach_by_process_name(&mut self, name: &str) -> MemoryResult<()> {
        if self.is_attached() {
            return Ok(());
        }
        Self::request_privileges();

        let Some(entry) = snapshot::find_process_exact(name)? else {
            debug!(process = name, "no running process matches, staying detached");
            return Ok(());
        };

        let handle = ProcessHandle::open_all_access(entry.pid)?;
        let win = window::find_by_pid(entry.pid);
        if win.is_none() {
            debug!(pid = entry.pid, "target has no discoverable top-level window");
        }

        info!(pid = entry.pid, process = name, "attached by process name");
        self.attachment = Some(Attachment {
            pid: entry.pid,
            window: win,
            handle,
        });
        Ok(())
    }

    /// Best-effort privilege elevation; failure is logged, not fatal.
    fn request_privileges() {
        if let Err(err) = privileges::ensure_debug_privilege() {
            warn!(error = %err, "debug privilege unavailable, continuing without it");
        }
    }

    fn attached(&self) -> MemoryResult<&Attachment> {
        self.attachment.as_ref().ok_or(MemoryError::NotAttached)
    }

    /// Enumerates the target's loaded modules. Requires attachment; the
    /// list is re-queried fresh on every call.
    pub fn modules(&self) -> MemoryResult<Vec<ModuleEntry>> {
        let attachment = self.attached()?;
        modules::enumerate_modules(&attachment.handle)
    }

    /// Resolves a module's load base by file name (path prefix stripped,
    /// case-sensitive). Enumeration failure and an absent module both
    /// surface as `ModuleNotFound`; the underlying failure is logged.
    pub fn module_base(&self, name: &str) -> MemoryResult<Address> {
        let attachment = self.attached()?;
        let list = modules::enumerate_modules(&attachment.handle).map_err(|err| {
            debug!(error = %err, "module enumeration failed");
            MemoryError::ModuleNotFound(name.to_string())
        })?;
        find_module(&list, name)
            .map(|m| m.base)
            .ok_or_else(|| MemoryError::ModuleNotFound(name.to_string()))
    }

    /// Typed validated reader over this target.
    pub fn reader(&self) -> MemoryReader<'_, Self> {
        MemoryReader::new(self)
    }

    /// Typed validated writer over this target.
    pub fn writer(&self) -> MemoryWriter<'_, Self> {
        MemoryWriter::new(self)
    }
}

impl ProcessMemory for RemoteProcess {
    fn read_raw(&self, address: Address, buf: &mut [u8]) -> MemoryResult<()> {
        self.attached()?.handle.read_memory(address, buf)
    }

    fn write_raw(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        self.attached()?.handle.write_memory(address, data)
    }

    fn query_region(&self, address: Address) -> MemoryResult<RegionInfo> {
        self.attached()?.handle.query_region(address)
    }
}
