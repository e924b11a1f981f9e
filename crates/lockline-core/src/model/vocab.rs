// Event vocabulary written by the locker firmware. One place for the
// string constants so call sites and tests cannot drift apart.

/// Storage confirmed; carries `arg.oid`, `arg.token`, `arg.chid`.
pub const STORE_CONFIRM: &str = "store/store_ok";
/// Dispense side is ready to release the order.
pub const DISPENSE_READY: &str = "dispense/ready";
/// Product handed out; terminal event of a completed order.
pub const DISPENSE_DONE: &str = "dispense/prod_dispensed";
/// Order removed without dispensing.
pub const DISPOSED: &str = "dispose/dispose_ok";
/// Code reader scan.
pub const READER_SCAN: &str = "reader/read";
/// Authentication accepted.
pub const AUTH_OK: &str = "auth/auth_ok";
/// Interactive session went idle.
pub const SESSION_TIMEOUT: &str = "sess/timeout";
/// Interactive session started.
pub const SESSION_BEGIN: &str = "sess/session_begin";
/// Device finished booting.
pub const POWER_ON: &str = "sys/sys_op";

/// Canonical half of a paired before/after cabin-status transition. The
/// "after" half carries the same delta and must never be decoded.
pub const BEFORE_HINT: &str = "before_hint";
