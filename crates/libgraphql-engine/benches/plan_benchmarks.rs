use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use libgraphql_engine::cache::DefaultQueryPlanCacheKeyManager;
use libgraphql_engine::cache::QueryPlanCacheKeyManager;
use libgraphql_engine::execution::GraphQueryExecutionContext;
use libgraphql_engine::execution::GraphQueryRequest;
use libgraphql_engine::execution::NullEventListener;
use libgraphql_engine::plan::DefaultQueryPlanGenerator;
use libgraphql_engine::runtime::GraphQueryRuntime;
use libgraphql_engine::schema::Schema;
use libgraphql_engine::schema::SchemaBuilder;
use serde_json::json;
use std::sync::Arc;

const SCHEMA: &str = r#"
interface Node { id: ID! }

type User implements Node {
  id: ID!
  name: String
  friends(first: Int = 10): [User!]!
  posts: [Post!]!
}

type Post implements Node {
  id: ID!
  title: String!
  author: User!
}

type Query {
  node(id: ID!): Node
  user(id: ID!): User
  users: [User!]!
}
"#;

const SIMPLE_QUERY: &str = "{ user(id: 1) { id name } }";

const NESTED_QUERY: &str = r#"
query Feed($id: ID!, $first: Int) {
  user(id: $id) {
    ...UserFields
    friends(first: $first) {
      ...UserFields
      posts { id title author { ...UserFields } }
    }
  }
  node(id: $id) {
    id
    ... on User { friends { id } }
    ... on Post { title }
  }
}

fragment UserFields on User { id name }
"#;

fn schema() -> Arc<Schema> {
    let builder = SchemaBuilder::from_str("bench", SCHEMA).expect("bench schema parses");
    Arc::new(builder.build().expect("bench schema builds"))
}

fn plan_generation(c: &mut Criterion) {
    let schema = schema();
    let generator = DefaultQueryPlanGenerator::new();
    let mut group = c.benchmark_group("plan_generation");

    group.bench_function("simple_query", |b| {
        b.iter(|| black_box(generator.generate_from_text(SIMPLE_QUERY, &schema)))
    });

    group.bench_function("nested_query_with_fragments", |b| {
        b.iter(|| black_box(generator.generate_from_text(NESTED_QUERY, &schema)))
    });

    group.finish();
}

fn cache_keys(c: &mut Criterion) {
    let key_manager = DefaultQueryPlanCacheKeyManager::new();

    c.bench_function("cache_key/nested_query", |b| {
        b.iter(|| black_box(key_manager.create_key("bench", NESTED_QUERY)))
    });
}

fn execution(c: &mut Criterion) {
    let tokio_rt = tokio::runtime::Runtime::new().expect("tokio runtime starts");
    let runtime = GraphQueryRuntime::new(schema()).with_listener(Arc::new(NullEventListener));
    let users: Vec<_> = (0..100)
        .map(|idx| json!({ "id": idx, "name": format!("user {idx}"), "posts": [] }))
        .collect();
    let root_value = json!({ "users": users });

    c.bench_function("execute/cached_plan_100_users", |b| {
        b.iter(|| {
            let context = GraphQueryExecutionContext::new(
                GraphQueryRequest::new("{ users { id name posts { title } } }"),
            ).with_root_value(root_value.clone());
            black_box(tokio_rt.block_on(runtime.execute(context)))
        })
    });
}

criterion_group!(benches, plan_generation, cache_keys, execution);
criterion_main!(benches);
