/// Entry point for the `cgroup-props` diagnostic tool.
///
/// Detects which cgroup hierarchy version each controller uses on this host, and
/// optionally reads or writes a single property of one container.
///
/// # Errors
///
/// Returns an error if capability detection fails, the arguments are invalid, or the
/// property cannot be read or written.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug cargo run
/// CGROUP_PROPS_UNIFIED_PATH=/sys/fs/cgroup/system.slice/web.service cargo run -- memory-limit
/// CGROUP_PROPS_UNIFIED_PATH=/sys/fs/cgroup/system.slice/web.service cargo run -- pids-max 512
/// ```
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    cgroup_props::run(&args)
}
