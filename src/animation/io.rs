//! Plain-text animation files.
//!
//! ```text
//! <frames> <transforms per frame>
//! tx ty tz qx qy qz qw      (one line per transform, frames in order)
//! ```
//!
//! Loading parses and validates the whole file before the animator is
//! touched; saving writes a sibling temporary file and renames it over the
//! destination.

use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::animation::animator::Animator;
use crate::animation::keyframes::Keyframe;
use crate::errors::{ArmatureError, Result};
use crate::math::RigidTransform;

/// Default file name used by the editor's save/load commands.
pub const DEFAULT_ANIMATION_FILE: &str = "animation.txt";

/// Renders all keyframes of `animator` in the animation file format.
#[must_use]
pub fn animation_to_string(animator: &Animator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", animator.len(), animator.node_count());
    for frame in animator.keyframes().iter() {
        for rbt in frame {
            let t = rbt.translation();
            let q = rbt.rotation();
            let _ = writeln!(out, "{} {} {} {} {} {} {}", t.x, t.y, t.z, q.x, q.y, q.z, q.w);
        }
    }
    out
}

/// Writes the animation to `path`, replacing it only once fully written.
pub fn save_animation(animator: &Animator, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let tmp = temp_path(path);
    let contents = animation_to_string(animator);

    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if let Err(err) = result {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    log::info!(
        "Wrote {} keyframes x {} transforms to {}",
        animator.len(),
        animator.node_count(),
        path.display()
    );
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: Box::new(
                text.lines()
                    .enumerate()
                    .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok))),
            ),
            last_line: 1,
        }
    }

    fn next_token(&mut self, what: &str) -> Result<(usize, &'a str)> {
        match self.inner.next() {
            Some((line, tok)) => {
                self.last_line = line;
                Ok((line, tok))
            }
            None => Err(ArmatureError::Parse {
                line: self.last_line,
                message: format!("unexpected end of file, expected {what}"),
            }),
        }
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        let (line, tok) = self.next_token(what)?;
        tok.parse().map_err(|_| ArmatureError::Parse {
            line,
            message: format!("invalid {what} `{tok}`"),
        })
    }

    fn next_f32(&mut self) -> Result<(usize, f32)> {
        let (line, tok) = self.next_token("a number")?;
        match tok.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok((line, v)),
            _ => Err(ArmatureError::Parse {
                line,
                message: format!("invalid number `{tok}`"),
            }),
        }
    }
}

/// Parses an animation file whose frames must each hold `expected_nodes`
/// transforms.
pub fn parse_animation(text: &str, expected_nodes: usize) -> Result<Vec<Keyframe>> {
    let mut tokens = Tokens::new(text);
    let frame_count = tokens.next_usize("frame count")?;
    let per_frame = tokens.next_usize("transforms per frame")?;
    if per_frame != expected_nodes {
        return Err(ArmatureError::NodeCountMismatch {
            expected: expected_nodes,
            found: per_frame,
        });
    }

    let mut frames = Vec::with_capacity(frame_count.min(1024));
    for _ in 0..frame_count {
        let mut frame = Keyframe::with_capacity(per_frame);
        for _ in 0..per_frame {
            let mut v = [0.0_f32; 7];
            let mut line = 0;
            for slot in &mut v {
                (line, *slot) = tokens.next_f32()?;
            }
            let rbt = RigidTransform::from_quat_components(
                Vec3::new(v[0], v[1], v[2]),
                v[3],
                v[4],
                v[5],
                v[6],
            )
            .ok_or_else(|| ArmatureError::Parse {
                line,
                message: "zero-length rotation quaternion".into(),
            })?;
            frame.push(rbt);
        }
        frames.push(frame);
    }

    if let Some((line, tok)) = tokens.inner.next() {
        return Err(ArmatureError::Parse {
            line,
            message: format!("unexpected trailing data `{tok}`"),
        });
    }
    Ok(frames)
}

/// Replaces the animator's keyframes with the contents of `path`.
///
/// On any error the existing keyframes are left untouched.
pub fn load_animation(animator: &mut Animator, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let frames = parse_animation(&text, animator.node_count())?;
    let count = frames.len();
    animator.replace_keyframes(frames)?;
    log::info!("Read {count} keyframes from {}", path.display());
    Ok(count)
}
