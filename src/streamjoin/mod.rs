/*!
# streamjoin module structure

- `join`: the merge/sufficiency/eviction engine, its business-logic trait,
  error taxonomy, and the stream-driven runner loop
- `table`: the keyed join-table abstraction and its in-memory and
  hash-partitioned implementations
*/

pub mod join;
pub mod table;
