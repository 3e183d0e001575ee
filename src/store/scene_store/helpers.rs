// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn decode_scene(path: &Path, raw: &str) -> Result<LoadedScene, StoreError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
    let serde_json::Value::Array(entries) = value else {
        return Err(StoreError::NotAnArray { path: path.to_path_buf() });
    };

    let mut elements = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<DiagramElement>(entry) {
            Ok(element) => elements.push(element),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    index = idx,
                    error = %err,
                    "skipping element"
                );
                skipped += 1;
            }
        }
    }

    Ok(LoadedScene { scene: Scene::new(elements), skipped })
}

/// Moves a fully written temp file over the scene file. The temp file never outlives a failure.
fn swap_into_place(tmp_path: &Path, scene_path: &Path) -> Result<(), StoreError> {
    let result = fs::rename(tmp_path, scene_path);

    // Windows refuses to rename over an existing file.
    #[cfg(windows)]
    let result = match result {
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
            ) =>
        {
            let _ = fs::remove_file(scene_path);
            fs::rename(tmp_path, scene_path)
        }
        other => other,
    };

    result.map_err(|source| {
        let _ = fs::remove_file(tmp_path);
        StoreError::Io { path: scene_path.to_path_buf(), source }
    })
}

fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".sketchwire.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: tmp_path, source });
    }

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    }
    drop(file);

    swap_into_place(&tmp_path, path)?;

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent)
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
            dir.sync_all()
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
        }
    }

    Ok(())
}
