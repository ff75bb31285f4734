// Resume and profile photo storage. One of each per user; uploads replace.

pub mod handlers;
