//! Mountinfo line parser for Linux systems.
//!
//! Parses lines in `/proc/[pid]/mountinfo` format. See
//! [`proc_pid_mountinfo(5)`](https://man7.org/linux/man-pages/man5/proc_pid_mountinfo.5.html)
//! for details on the structure.

use std::borrow::Cow;

/// Represents a parsed mountinfo line.
#[derive(Debug, PartialEq, Eq)]
pub struct MountInfo<'a> {
    /// Root of the mount within the filesystem.
    pub root: Cow<'a, str>,
    /// Mount point relative to the process's root, with octal escapes decoded.
    pub mount_point: Cow<'a, str>,
    /// Per-mount options, e.g. `rw,nosuid`.
    pub mount_options: &'a str,
    /// Filesystem type (e.g., `cgroup`, `cgroup2`).
    pub fs_type: &'a str,
    /// Superblock options. For cgroup v1 mounts these name the attached controllers.
    pub super_options: &'a str,
}

impl MountInfo<'_> {
    /// Iterates over the comma-separated superblock options.
    pub fn super_options(&self) -> impl Iterator<Item = &str> {
        self.super_options.split(',').filter(|option| !option.is_empty())
    }
}

/// Named fields in a mountinfo line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountInfoField {
    MountId,
    ParentId,
    MajorMinor,
    Root,
    MountPoint,
    MountOptions,
    FsType,
    Source,
    SuperOptions,
}

impl std::fmt::Display for MountInfoField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MountInfoField::MountId => "mount_id",
            MountInfoField::ParentId => "parent_id",
            MountInfoField::MajorMinor => "major:minor",
            MountInfoField::Root => "root",
            MountInfoField::MountPoint => "mount_point",
            MountInfoField::MountOptions => "mount_options",
            MountInfoField::FsType => "fs_type",
            MountInfoField::Source => "source",
            MountInfoField::SuperOptions => "super_options",
        };
        write!(f, "{name}")
    }
}

/// Errors that may occur when parsing a mountinfo line.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum ParseError {
    #[error("missing separator ` - ` in line: `{0}`")]
    MissingSeparator(String),

    #[error("missing `{field}` in pre-separator section of line: `{line}`")]
    MissingPreSeparatorField { field: MountInfoField, line: String },

    #[error("missing `{field}` in post-separator section of line: `{line}`")]
    MissingPostSeparatorField { field: MountInfoField, line: String },
}

const PRE_SEPARATOR_FIELDS: [MountInfoField; 6] = [
    MountInfoField::MountId,
    MountInfoField::ParentId,
    MountInfoField::MajorMinor,
    MountInfoField::Root,
    MountInfoField::MountPoint,
    MountInfoField::MountOptions,
];

const POST_SEPARATOR_FIELDS: [MountInfoField; 3] = [
    MountInfoField::FsType,
    MountInfoField::Source,
    MountInfoField::SuperOptions,
];

/// Parses a single line of mountinfo data.
///
/// Optional fields between the mount options and the ` - ` separator are skipped.
///
/// # Errors
///
/// Returns [`ParseError`] variants for missing separator or required fields.
pub fn parse_mount_info_line(line: &str) -> Result<MountInfo<'_>, ParseError> {
    let line = line.trim_end_matches('\n');
    let (pre, post) = line
        .split_once(" - ")
        .ok_or_else(|| ParseError::MissingSeparator(line.to_owned()))?;

    let mut pre_fields = pre.split_whitespace();
    let mut pre_values = [""; PRE_SEPARATOR_FIELDS.len()];
    for (slot, field) in pre_values.iter_mut().zip(PRE_SEPARATOR_FIELDS) {
        *slot = pre_fields
            .next()
            .ok_or_else(|| ParseError::MissingPreSeparatorField {
                field,
                line: line.to_owned(),
            })?;
    }

    let mut post_fields = post.split_whitespace();
    let mut post_values = [""; POST_SEPARATOR_FIELDS.len()];
    for (slot, field) in post_values.iter_mut().zip(POST_SEPARATOR_FIELDS) {
        *slot = post_fields
            .next()
            .ok_or_else(|| ParseError::MissingPostSeparatorField {
                field,
                line: line.to_owned(),
            })?;
    }

    let [_, _, _, root, mount_point, mount_options] = pre_values;
    let [fs_type, _, super_options] = post_values;

    Ok(MountInfo {
        root: unescape_octal(root),
        mount_point: unescape_octal(mount_point),
        mount_options,
        fs_type,
        super_options,
    })
}

/// Decodes the `\ooo` escapes the kernel uses for space, tab, newline and backslash.
fn unescape_octal(field: &str) -> Cow<'_, str> {
    if !field.contains('\\') {
        return Cow::Borrowed(field);
    }

    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes.get(i + 1..i + 4) {
            Some(digits) if bytes[i] == b'\\' && is_octal_escape(digits) => {
                let [high, mid, low] = [digits[0], digits[1], digits[2]].map(|d| d - b'0');
                out.push((high << 6) | (mid << 3) | low);
                i += 4;
            }
            _ => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }

    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

fn is_octal_escape(digits: &[u8]) -> bool {
    digits.len() == 3
        && (b'0'..=b'3').contains(&digits[0])
        && digits[1..].iter().all(|d| (b'0'..=b'7').contains(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cgroup2_line() {
        let line = "35 24 0:30 / /sys/fs/cgroup rw,nosuid,nodev,noexec,relatime shared:9 - cgroup2 cgroup2 rw,nsdelegate,memory_recursiveprot\n";
        let result = parse_mount_info_line(line).unwrap();

        assert_eq!(result.root, "/");
        assert_eq!(result.mount_point, "/sys/fs/cgroup");
        assert_eq!(result.mount_options, "rw,nosuid,nodev,noexec,relatime");
        assert_eq!(result.fs_type, "cgroup2");
        assert_eq!(
            result.super_options,
            "rw,nsdelegate,memory_recursiveprot"
        );
    }

    #[test]
    fn parses_cgroup_v1_controller_options() {
        let line = "31 25 0:27 / /sys/fs/cgroup/cpu,cpuacct rw,nosuid,nodev,noexec,relatime shared:11 - cgroup cgroup rw,cpu,cpuacct";
        let result = parse_mount_info_line(line).unwrap();

        assert_eq!(result.fs_type, "cgroup");
        assert_eq!(
            result.super_options().collect::<Vec<_>>(),
            vec!["rw", "cpu", "cpuacct"]
        );
    }

    #[test]
    fn parses_line_without_optional_fields() {
        let line = "36 25 0:32 / /sys rw - sysfs sysfs rw";
        let result = parse_mount_info_line(line).unwrap();
        assert_eq!(result.fs_type, "sysfs");
        assert_eq!(result.mount_options, "rw");
    }

    #[test]
    fn decodes_escaped_mount_point() {
        let line = "70 56 0:45 / /mnt/my\\040cgroup rw shared:20 - cgroup2 none rw";
        let result = parse_mount_info_line(line).unwrap();
        assert_eq!(result.mount_point, "/mnt/my cgroup");
    }

    #[test]
    fn keeps_incomplete_escape() {
        assert_eq!(unescape_octal("/a\\04"), "/a\\04");
        assert_eq!(unescape_octal("/a\\x40b"), "/a\\x40b");
        assert_eq!(unescape_octal("/a\\134b"), "/a\\b");
    }

    #[test]
    fn error_on_missing_separator() {
        let line = "42 35 0:22 / /mnt rw,nosuid ext4 /dev/sda1 rw";
        let err = parse_mount_info_line(line).unwrap_err();
        assert!(matches!(err, ParseError::MissingSeparator(_)));
    }

    #[test]
    fn error_on_missing_mount_options() {
        let line = "42 35 0:22 / /mnt - ext4 /dev/sda1 rw";
        let err = parse_mount_info_line(line).unwrap_err();
        match err {
            ParseError::MissingPreSeparatorField { field, .. } => {
                assert_eq!(field.to_string(), "mount_options");
            }
            _ => panic!("Expected MissingPreSeparatorField"),
        }
    }

    #[test]
    fn error_on_missing_post_separator_fields() {
        let line = "42 35 0:22 / /mnt rw - cgroup cgroup";
        let err = parse_mount_info_line(line).unwrap_err();
        match err {
            ParseError::MissingPostSeparatorField { field, .. } => {
                assert_eq!(field, MountInfoField::SuperOptions);
            }
            _ => panic!("Expected MissingPostSeparatorField"),
        }
    }

    #[test]
    fn error_on_empty_line() {
        let err = parse_mount_info_line("").unwrap_err();
        assert!(matches!(err, ParseError::MissingSeparator(_)));
    }
}
