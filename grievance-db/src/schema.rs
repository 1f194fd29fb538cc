//! Postgres schema definitions for the grievance store.

/// Complete grievance schema.
///
/// `photos` and `history` are JSONB documents embedded per record; `history`
/// is append-only and only ever grows through the status-transition
/// statement. The enum CHECK constraints back up the store-level parsing so
/// an out-of-range value can never be persisted.
pub const GRIEVANCE_SCHEMA: &str = r#"
-- ============================================
-- Submissions (citizen complaints / petitions)
-- ============================================
create table if not exists submissions (
  id text primary key,
  type text not null check (type in ('complaint','petition')),
  name text not null,
  phone text not null,
  email text,
  department text,
  category text,
  taluk text not null,
  firka text not null,
  village text not null,
  description text not null,
  urgency text not null check (urgency in ('low','medium','high')),
  status text not null,
  photos jsonb not null default '[]'::jsonb,
  history jsonb not null default '[]'::jsonb,
  timestamp timestamptz not null default now(),
  last_updated timestamptz not null default now(),
  resolved_at timestamptz
);

create index if not exists idx_submissions_recency
  on submissions (last_updated desc, timestamp desc);

-- ============================================
-- Officials (administrative accounts)
-- ============================================
create table if not exists officials (
  id serial primary key,
  username text unique not null,
  password text not null
);
"#;
