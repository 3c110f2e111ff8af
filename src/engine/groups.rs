use super::edges::Edge;

/// Partitions `0..node_count` into the connected components of `edges`.
///
/// Traversal starts from the lowest unvisited index and uses an explicit
/// stack. Members of each component are sorted, and components are ordered
/// by their smallest member, so the output depends only on the edge set.
pub fn connected_components(node_count: usize, edges: &[Edge]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); node_count];
    for edge in edges {
        let (a, b) = (edge.pair.low(), edge.pair.high());
        if a >= node_count || b >= node_count || a == b {
            continue;
        }
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut visited = vec![false; node_count];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in 0..node_count {
        if visited[start] {
            continue;
        }

        visited[start] = true;
        stack.push(start);
        let mut component = Vec::new();

        while let Some(node) = stack.pop() {
            component.push(node);
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}
