//! Scenario tests spanning tracker, queries, and resolver
