pub mod cache;

#[cfg(test)]
pub(crate) mod test_gateway;
