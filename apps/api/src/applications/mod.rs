// Job application tracking: plain CRUD over the `applications` table,
// always scoped to the authenticated user.

pub mod handlers;
