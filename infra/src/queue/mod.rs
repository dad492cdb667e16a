//! Redis-backed work queue
//!
//! Jobs for a queue live in a single Redis list at `{prefix}:{queue}:wait`.
//! Producers `LPUSH` onto the list and consumers `BRPOP` from it, so each
//! queue is delivered in FIFO order to exactly one consumer.

pub mod redis_client;
pub mod redis_queue;


pub use redis_client::RedisClient;
pub use redis_queue::RedisJobQueue;
