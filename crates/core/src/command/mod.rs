pub mod arguments;
pub mod invocation;

pub use arguments::TaskArgumentBuilder;
pub use invocation::TaskInvocationSpec;

/// Gradle task provided by the Spotless plugin.
pub const GRADLE_SPOTLESS_TASK: &str = "spotlessApply";

/// Maven goal provided by the Spotless plugin.
pub const MAVEN_SPOTLESS_GOAL: &str = "spotless:apply";
