use std::io;

use tokio::process::Command;

/// Put the child in its own process group so the whole subtree can be
/// signalled as one unit.
#[cfg(unix)]
pub fn prepare_command(cmd: &mut Command) {
    unsafe {
        cmd.pre_exec(|| {
            if libc::setpgid(0, 0) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(not(unix))]
pub fn prepare_command(_cmd: &mut Command) {}

/// Check whether a process is alive. EPERM means the process exists
/// but we lack permission to signal it.
#[cfg(unix)]
pub fn process_alive(pid: u32) -> bool {
    match send_signal(pid as libc::pid_t, 0) {
        Ok(()) => true,
        Err(errno) => errno == libc::EPERM,
    }
}

#[cfg(not(unix))]
pub fn process_alive(_pid: u32) -> bool {
    false
}

/// Send SIGTERM to the process group led by `pid`.
#[cfg(unix)]
pub fn terminate_group(pid: u32) -> io::Result<()> {
    if pid == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no pid recorded"));
    }
    send_signal(-(pid as libc::pid_t), libc::SIGTERM).map_err(io::Error::from_raw_os_error)
}

#[cfg(not(unix))]
pub fn terminate_group(_pid: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "process-group termination is not supported on this platform",
    ))
}

#[cfg(unix)]
fn send_signal(pid: libc::pid_t, signal: libc::c_int) -> Result<(), libc::c_int> {
    let result = unsafe { libc::kill(pid, signal) };
    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }
}
