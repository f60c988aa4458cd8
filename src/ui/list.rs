//! Rendering of the `list` output

use crate::envarg::EnvArgs;
use crate::target::TargetRegistry;
use crate::ui::display_default;
use std::fmt::Write;

/// Render targets by group, then environment arguments
pub fn render_list(registry: &TargetRegistry, env_args: &EnvArgs) -> String {
    let mut out = String::new();

    if !registry.is_empty() {
        out.push_str("available targets:\n");
        for (group, targets) in registry.by_group() {
            let _ = writeln!(out, "  {}", group);
            for target in targets {
                let _ = write!(out, "    {} - {}", target.name, target.description_or_default());
                if !target.dependencies.is_empty() {
                    let _ = write!(out, " (depends: {})", target.dependencies.join(", "));
                }
                out.push('\n');
            }
        }
    }

    if !env_args.is_empty() {
        out.push_str("\nenvironment arguments:\n");
        for arg in env_args.iter() {
            let _ = writeln!(
                out,
                "  {} - {} (default: {})",
                arg.name,
                arg.description.as_deref().unwrap_or(crate::target::NO_DESCRIPTION),
                display_default(arg)
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envarg::{ArgSources, EnvArgSpec, EnvLookup};
    use crate::target::{Target, BUILTIN_GROUP};
    use std::collections::HashMap;

    #[test]
    fn test_render_list() {
        let mut registry = TargetRegistry::new();
        registry
            .register(
                Target::new("list", || Ok(()))
                    .with_description("lists all available targets")
                    .with_group(BUILTIN_GROUP),
            )
            .unwrap();
        registry
            .register(Target::new("fetch", || Ok(())).with_description("fetch releases"))
            .unwrap();
        registry
            .register(
                Target::new("latest", || Ok(()))
                    .with_group("print")
                    .with_dependencies(["fetch"]),
            )
            .unwrap();

        let sources = ArgSources::new().with_env(EnvLookup::Fixed(HashMap::new()));
        let mut env_args = EnvArgs::new();
        env_args
            .declare(
                EnvArgSpec {
                    description: Some("API token".to_string()),
                    default: Some("abc".to_string()),
                    sensitive: true,
                    ..EnvArgSpec::new("TOKEN")
                },
                &sources,
            )
            .unwrap();
        env_args
            .declare(
                EnvArgSpec {
                    default: Some("100".to_string()),
                    ..EnvArgSpec::new("MAX_RESULTS")
                },
                &sources,
            )
            .unwrap();
        env_args.declare(EnvArgSpec::new("REGION"), &sources).unwrap();

        let expected = "\
available targets:
  <builtin>
    list - lists all available targets
  <ungrouped>
    fetch - fetch releases
  print
    latest - <no description> (depends: fetch)

environment arguments:
  TOKEN - API token (default: **********)
  MAX_RESULTS - <no description> (default: 100)
  REGION - <no description> (default: none)
";
        assert_eq!(render_list(&registry, &env_args), expected);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_list(&TargetRegistry::new(), &EnvArgs::new()), "");
    }
}
