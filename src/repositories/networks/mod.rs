pub mod network_repo;
