//! End-to-end tests for the Folio workspace live in `tests/`.
