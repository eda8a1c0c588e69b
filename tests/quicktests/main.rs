//! Property tests run against the public `TreeMap` API.

mod treemap;
