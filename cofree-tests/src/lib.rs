pub mod naive;
pub mod shapes;

#[cfg(test)]
mod tests;
