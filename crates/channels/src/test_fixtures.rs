//! Template fixtures shared by unit tests.

/// Cask template as produced by GoReleaser.
pub const CASK_TEMPLATE: &str = r##"# This file was generated by GoReleaser. DO NOT EDIT.
# typed: false
# frozen_string_literal: true
cask "sentrie" do
  name "sentrie"
  desc "Sentrie policy engine"
  homepage "https://sentrie.sh"
  version "1.2.3"

  binary "sentrie"

  on_macos do
    on_intel do
      url "https://github.com/sentrie-sh/sentrie/releases/download/v#{version}/sentrie_#{version}_darwin_amd64.tar.gz",
        verified: "github.com/sentrie-sh/sentrie"
      sha256 "test123"
    end
  end
end
"##;

/// Formula template with one install block per platform.
pub const FORMULA_TEMPLATE: &str = r##"# This file was generated by GoReleaser. DO NOT EDIT.
# typed: false
# frozen_string_literal: true
class Sentrie < Formula
  desc "Sentrie policy engine"
  homepage "https://sentrie.sh"
  version "1.2.3"
  license "Apache-2.0"

  on_macos do
    if Hardware::CPU.intel?
      url "https://example.com/sentrie_darwin_amd64.tar.gz"
      def install
        bin.install "sentrie"
      end
    end
    if Hardware::CPU.arm?
      url "https://example.com/sentrie_darwin_arm64.tar.gz"
      def install
        bin.install "sentrie"
      end
    end
  end

  test do
    system "#{bin}/sentrie", "version"
  end
end
"##;

