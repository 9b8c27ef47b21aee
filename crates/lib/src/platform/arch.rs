/// Map a Rust architecture name to the name the native build uses.
///
/// Names without a counterpart pass through unchanged.
pub fn build_arch_name(rust_arch: &'static str) -> &'static str {
  match rust_arch {
    "x86" => "i686",
    "mips" => "mipsel",
    other => other,
  }
}

/// Returns the host CPU architecture in build vocabulary
pub fn host_arch() -> &'static str {
  build_arch_name(std::env::consts::ARCH)
}

/// Rewrite user-facing architecture aliases to their canonical names.
pub fn normalize(arch: &str) -> &str {
  match arch {
    "x86" => "i686",
    "x64" => "x86_64",
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aliases_are_normalized() {
    assert_eq!(normalize("x86"), "i686");
    assert_eq!(normalize("x64"), "x86_64");
  }

  #[test]
  fn other_architectures_pass_through() {
    for arch in ["aarch64", "arm", "openwrt", "i686", "x86_64", "mipsel"] {
      assert_eq!(normalize(arch), arch);
    }
  }

  #[test]
  fn rust_names_map_to_build_names() {
    assert_eq!(build_arch_name("x86"), "i686");
    assert_eq!(build_arch_name("x86_64"), "x86_64");
    assert_eq!(build_arch_name("aarch64"), "aarch64");
  }
}
