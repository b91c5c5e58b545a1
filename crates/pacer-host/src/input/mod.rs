pub mod stdin;
