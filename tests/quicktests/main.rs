//! Property tests exercising `BalancedTree` through its public interface only.

mod balanced;
