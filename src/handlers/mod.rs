// Handlers by security tier: public (no auth) and announcements
// (mandatory auth for create, optional auth for list).
pub mod announcements;
pub mod public;
