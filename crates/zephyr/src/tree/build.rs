use std::collections::{HashMap, HashSet};

use zephyr_sdk::types::Folder;
use zephyr_sdk::{fetch_all, fetch_up_to};

use super::{TestCaseRef, TreeError, TreeNode, TreeSource, PAGE_SIZE};

/// Whether and how many test cases to hang under each folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCaseMode {
    /// Folders only.
    None,
    /// At most this many per folder, flagging folders that hold more.
    UpTo(u32),
    /// Every test case of every folder.
    All,
}

/// Bucket of the adjacency index. `Root` never collides with a folder id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ParentKey {
    Root,
    Folder(i64),
}

/// Partially assembled node on the work stack.
struct Frame {
    index: usize,
    next_child: usize,
    children: Vec<TreeNode>,
}

impl Frame {
    fn new(index: usize) -> Self {
        Self {
            index,
            next_child: 0,
            children: Vec::new(),
        }
    }
}

/// Arrange a flat folder list into a forest.
///
/// Roots are folders without a parent or whose parent is not in `folders`.
/// Siblings keep their input order. A repeated id keeps its first record.
/// Folders that no root reaches form a parentage cycle and fail the build.
pub fn build_forest(folders: Vec<Folder>) -> Result<Vec<TreeNode>, TreeError> {
    let mut seen = HashSet::new();
    let folders: Vec<Folder> = folders
        .into_iter()
        .filter(|f| {
            let first = seen.insert(f.id);
            if !first {
                tracing::debug!("Ignoring duplicate folder {}", f.id);
            }
            first
        })
        .collect();

    let mut index: HashMap<ParentKey, Vec<usize>> = HashMap::new();
    for (i, folder) in folders.iter().enumerate() {
        let key = match folder.parent_id {
            Some(parent) if seen.contains(&parent) => ParentKey::Folder(parent),
            _ => ParentKey::Root,
        };
        index.entry(key).or_default().push(i);
    }

    let children_of = |key: ParentKey| index.get(&key).map(Vec::as_slice).unwrap_or(&[]);

    let mut visited = vec![false; folders.len()];
    let mut forest = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for &root in children_of(ParentKey::Root) {
        visited[root] = true;
        stack.push(Frame::new(root));

        while let Some(frame) = stack.last_mut() {
            let kids = children_of(ParentKey::Folder(folders[frame.index].id));
            if let Some(&child) = kids.get(frame.next_child) {
                frame.next_child += 1;
                if visited[child] {
                    return Err(TreeError::FolderCycle {
                        folder_ids: vec![folders[child].id],
                    });
                }
                visited[child] = true;
                stack.push(Frame::new(child));
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let folder = &folders[done.index];
            let mut node = TreeNode::new(folder.id, folder.name.clone());
            node.children = done.children;
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => forest.push(node),
            }
        }
    }

    let unreachable: Vec<i64> = folders
        .iter()
        .zip(&visited)
        .filter(|(_, reached)| !**reached)
        .map(|(f, _)| f.id)
        .collect();
    if !unreachable.is_empty() {
        return Err(TreeError::FolderCycle {
            folder_ids: unreachable,
        });
    }

    Ok(forest)
}

/// Fill in test cases, visiting nodes depth-first, one folder at a time.
pub async fn attach_test_cases<S: TreeSource>(
    source: &S,
    forest: &mut [TreeNode],
    mode: TestCaseMode,
) -> Result<(), TreeError> {
    if mode == TestCaseMode::None {
        return Ok(());
    }

    let mut stack: Vec<&mut TreeNode> = forest.iter_mut().rev().collect();
    while let Some(node) = stack.pop() {
        let folder_id = node.id;
        tracing::debug!("Fetching test cases for folder {}", folder_id);
        let fetch_page = move |start_at: u32, max_results: u32| {
            source.test_cases_page(folder_id, start_at, max_results)
        };
        let (cases, has_more) = match mode {
            TestCaseMode::UpTo(limit) => fetch_up_to(limit, PAGE_SIZE, fetch_page).await,
            _ => fetch_all(PAGE_SIZE, fetch_page).await.map(|all| (all, false)),
        }
        .map_err(|e| TreeError::TestCaseFetch {
            folder_id,
            source: e,
        })?;

        node.test_cases = cases.into_iter().map(TestCaseRef::from).collect();
        node.has_more_test_cases = has_more;
        stack.extend(node.children.iter_mut().rev());
    }
    Ok(())
}

/// List every test-case folder of the project and arrange it as a forest.
pub async fn folder_tree<S: TreeSource>(
    source: &S,
    mode: TestCaseMode,
) -> Result<Vec<TreeNode>, TreeError> {
    tracing::info!("Fetching folder tree...");
    let folders = fetch_all(PAGE_SIZE, move |start_at, max_results| {
        source.folders_page(start_at, max_results)
    })
    .await?;
    tracing::info!("Found {} folder(s)", folders.len());

    let mut forest = build_forest(folders)?;
    if mode != TestCaseMode::None {
        tracing::info!("Fetching test cases. This may take a while...");
    }
    attach_test_cases(source, &mut forest, mode).await?;
    Ok(forest)
}
