//! Process attachment: handles, privileges, snapshots, modules, windows

mod handle;
mod modules;
mod privileges;
mod remote;
mod snapshot;
mod window;

pub use self::handle::ProcessHandle;
pub use self::modules::enumerate_modules;
pub use self::privileges::ensure_debug_privilege;
pub use self::remote::RemoteProcess;
pub use self::snapshot::{find_process_exact, ProcessEntry, ProcessSnapshot};
pub use self::window::WindowHandle;
