pub mod disk_usage;
