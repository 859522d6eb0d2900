//! Name binding over corpora loaded from disk.

mod tests_binding;
