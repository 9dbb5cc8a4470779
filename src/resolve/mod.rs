pub(crate) mod codepoint;
