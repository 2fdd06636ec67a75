#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

//! `btt`: inspect the Bruhat-Tits tree of `PGL_2` over ℚ_p or 𝔽_p(x).

use anyhow::{ensure, Context, Result};
use btt_fields::{Adic, BigInt, DVField, FunctionField, Rational, RationalFunction, Ring};
use btt_linalg::{Matrix, Vector};
use btt_tree::{BruhatTitsTree, UnrootedTree, Vertex};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "btt",
    about = "Bruhat-Tits tree explorer",
    long_about = "Bruhat-Tits tree explorer.\n\nWalk the tree of lattice classes over a p-adic or function field, apply 2x2 matrices to vertices, and classify their action.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// Base field
    #[arg(long, value_enum, global = true, default_value_t = FieldOpt::Adic)]
    field: FieldOpt,

    /// Residue characteristic p (a prime)
    #[arg(long, global = true, env = "BTT_PRIME", default_value_t = 3)]
    prime: i64,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum FieldOpt {
    /// ℚ with the p-adic valuation
    Adic,
    /// 𝔽_p(x) with the x-adic valuation
    Function,
}

/// A vertex given as `u` and `n`; `u` is reduced modulo π^n.
#[derive(Args, Debug, Clone)]
struct VertexArg {
    /// Vertex coordinate u: `num/den` (adic) or `c0,c1,../d0,d1,..` (function)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    u: String,

    /// Vertex level n
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    n: i64,
}

/// A 2x2 integer matrix `a,b,c,d` with columns (a, b) and (c, d).
#[derive(Args, Debug, Clone)]
struct MatrixArg {
    /// Matrix entries, column by column
    #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
    matrix: Vec<i64>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the field, its residue field and the origin
    Info,

    /// List the p+1 neighbors of a vertex with their edge labels
    Neighbors {
        #[command(flatten)]
        vertex: VertexArg,
    },

    /// Print the path between two vertices
    Path {
        /// Start coordinate u
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        from_u: String,
        /// Start level n
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        from_n: i64,
        /// End coordinate u
        #[arg(long, allow_hyphen_values = true)]
        to_u: String,
        /// End level n
        #[arg(long, allow_hyphen_values = true)]
        to_n: i64,
    },

    /// Apply a matrix to a vertex
    Action {
        #[command(flatten)]
        matrix: MatrixArg,
        #[command(flatten)]
        vertex: VertexArg,
    },

    /// Translation length, reflection test and a minimally displaced vertex
    Classify {
        #[command(flatten)]
        matrix: MatrixArg,
    },

    /// Dump the ball around a vertex as an indented tree
    Render {
        #[command(flatten)]
        vertex: VertexArg,

        /// Radius of the ball
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(0..=8))]
        depth: u16,

        /// Tag vertices on the axis of (or fixed by) this matrix
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        matrix: Option<Vec<i64>>,

        /// Tag vertices whose lattice contains this end, given as `a,b`
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        end: Option<Vec<i64>>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.field {
        FieldOpt::Adic => {
            let field = Adic::new(cli.prime).with_context(|| format!("building the {}-adic field", cli.prime))?;
            run(&BruhatTitsTree::new(field)?, &cli.cmd)
        }
        FieldOpt::Function => {
            let field = FunctionField::new(cli.prime)
                .with_context(|| format!("building the function field over F_{}", cli.prime))?;
            run(&BruhatTitsTree::new(field)?, &cli.cmd)
        }
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/* -------------------------------- element parsing ------------------------------- */

/// Fields whose elements can be written on the command line.
trait ParseElement: DVField + Clone {
    fn parse_element(&self, s: &str) -> Result<Self::Element>;
}

impl ParseElement for Adic {
    fn parse_element(&self, s: &str) -> Result<Rational> {
        let (num, den) = s.split_once('/').unwrap_or((s, "1"));
        let num: BigInt = num.trim().parse().with_context(|| format!("numerator `{num}`"))?;
        let den: BigInt = den.trim().parse().with_context(|| format!("denominator `{den}`"))?;
        Ok(self.reduce(&num, &den)?)
    }
}

impl ParseElement for FunctionField {
    fn parse_element(&self, s: &str) -> Result<RationalFunction> {
        let (num, den) = s.split_once('/').unwrap_or((s, "1"));
        Ok(self.fraction(&parse_coeffs(num)?, &parse_coeffs(den)?)?)
    }
}

/// `c0,c1,...` low to high; blank means the zero polynomial.
fn parse_coeffs(s: &str) -> Result<Vec<i64>> {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.parse().with_context(|| format!("coefficient `{c}`")))
        .collect()
}

fn parse_vertex<F: ParseElement>(tree: &BruhatTitsTree<F>, u: &str, n: i64) -> Result<Vertex<F::Element>> {
    let u = tree.field().parse_element(u).with_context(|| format!("parsing vertex coordinate `{u}`"))?;
    Ok(tree.vertex(&u, n)?)
}

fn parse_matrix<F: ParseElement>(tree: &BruhatTitsTree<F>, entries: &[i64]) -> Result<Matrix<F::Element>> {
    ensure!(entries.len() == 4, "--matrix takes 4 entries a,b,c,d, got {}", entries.len());
    Ok(tree.algebra().from_ints(&[&entries[..2], &entries[2..]])?)
}

fn parse_end<F: ParseElement>(tree: &BruhatTitsTree<F>, entries: &[i64]) -> Result<Vector<F::Element>> {
    ensure!(entries.len() == 2, "--end takes 2 entries a,b, got {}", entries.len());
    ensure!(entries.iter().any(|&e| e != 0), "--end must be nonzero");
    Ok(tree.space().space().from_ints(entries)?)
}

/* ----------------------------------- commands ----------------------------------- */

fn run<F: ParseElement>(tree: &BruhatTitsTree<F>, cmd: &Cmd) -> Result<()> {
    match cmd {
        Cmd::Info => info_cmd(tree),
        Cmd::Neighbors { vertex } => neighbors(tree, &parse_vertex(tree, &vertex.u, vertex.n)?),
        Cmd::Path { from_u, from_n, to_u, to_n } => {
            path(tree, &parse_vertex(tree, from_u, *from_n)?, &parse_vertex(tree, to_u, *to_n)?)
        }
        Cmd::Action { matrix, vertex } => action(
            tree,
            &parse_matrix(tree, &matrix.matrix)?,
            &parse_vertex(tree, &vertex.u, vertex.n)?,
        ),
        Cmd::Classify { matrix } => classify(tree, &parse_matrix(tree, &matrix.matrix)?),
        Cmd::Render { vertex, depth, matrix, end } => {
            let matrix = matrix.as_deref().map(|m| parse_matrix(tree, m)).transpose()?;
            let end = end.as_deref().map(|e| parse_end(tree, e)).transpose()?;
            let center = parse_vertex(tree, &vertex.u, vertex.n)?;
            render(tree, &center, usize::from(*depth), matrix.as_ref(), end.as_ref())
        }
    }
}

fn info_cmd<F: ParseElement>(tree: &BruhatTitsTree<F>) -> Result<()> {
    info!(tree = %tree, p = tree.p(), "info");
    println!("{tree}");
    println!("field:          {}", tree.field().name());
    println!("residue field:  {}", tree.field().residue_field().name());
    println!("uniformizer:    {}", tree.field().format(&tree.field().uniformizer()));
    println!("valence:        {}", tree.p() + 1);
    println!("origin:         {}", tree.vertex_to_string(tree.origin()));
    Ok(())
}

fn neighbors<F: ParseElement>(tree: &BruhatTitsTree<F>, v: &Vertex<F::Element>) -> Result<()> {
    info!(vertex = %tree.vertex_to_string(v), "neighbors");
    for adj in tree.neighbors(v).context("computing neighbors")? {
        println!("{:>3}  {}", adj.edge, tree.vertex_to_string(&adj.vertex));
    }
    Ok(())
}

fn path<F: ParseElement>(tree: &BruhatTitsTree<F>, a: &Vertex<F::Element>, b: &Vertex<F::Element>) -> Result<()> {
    let steps = tree.path(a, b).context("walking the path")?;
    info!(from = %tree.vertex_to_string(a), to = %tree.vertex_to_string(b), len = steps.len(), "path");
    println!("     {}", tree.vertex_to_string(a));
    for step in &steps {
        println!("{:>3}  {}", step.edge, tree.vertex_to_string(&step.vertex));
    }
    println!("distance: {}", steps.len());
    Ok(())
}

fn action<F: ParseElement>(tree: &BruhatTitsTree<F>, m: &Matrix<F::Element>, v: &Vertex<F::Element>) -> Result<()> {
    ensure!(!tree.algebra().is_singular(m), "matrix {} is singular", tree.algebra().format(m));
    let image = tree.action(m, v)?;
    let moved = tree.translation_distance(m, v)?;
    info!(vertex = %tree.vertex_to_string(v), image = %tree.vertex_to_string(&image), moved, "action");
    println!("{} -> {}", tree.vertex_to_string(v), tree.vertex_to_string(&image));
    println!("displacement: {moved}");
    Ok(())
}

fn classify<F: ParseElement>(tree: &BruhatTitsTree<F>, m: &Matrix<F::Element>) -> Result<()> {
    let alg = tree.algebra();
    ensure!(!alg.is_singular(m), "matrix {} is singular", alg.format(m));

    let length = tree.translation_length(m)?;
    let reflection = tree.is_reflection(m)?;
    let min_dist = tree.min_vertex_translation_distance(m)?;
    let near = tree.min_translation_vertex(m)?;
    info!(matrix = %alg.format(m), length, reflection, min_dist, "classify");

    println!("matrix:                {}", alg.format(m));
    println!("determinant:           {}", tree.field().format(&alg.determinant(m)));
    println!("trace:                 {}", tree.field().format(&alg.trace(m)));
    println!("identity:              {}", tree.is_identity(m));
    println!("reflection:            {reflection}");
    println!("translation length:    {length}");
    println!("min displacement:      {min_dist}");
    println!("minimal vertex:        {}", tree.vertex_to_string(&near));
    println!("  displacement there:  {}", tree.translation_distance(m, &near)?);
    println!("  distance to origin:  {}", tree.distance(tree.origin(), &near)?);
    if length > 0 {
        println!("  on axis:             {}", tree.is_on_axis(m, &near)?);
    }
    Ok(())
}

fn render<F: ParseElement>(
    tree: &BruhatTitsTree<F>,
    center: &Vertex<F::Element>,
    depth: usize,
    matrix: Option<&Matrix<F::Element>>,
    end: Option<&Vector<F::Element>>,
) -> Result<()> {
    if let Some(m) = matrix {
        ensure!(!tree.algebra().is_singular(m), "matrix {} is singular", tree.algebra().format(m));
    }
    let hyperbolic = matrix.map(|m| tree.translation_length(m)).transpose()?.is_some_and(|l| l > 0);

    let snapshot = tree.snapshot(center, depth).context("building the ball")?;
    info!(center = %tree.vertex_to_string(center), depth, vertices = snapshot.len(), "render");

    for (level, node) in snapshot.preorder() {
        let v = &node.vertex;
        let mut tags = Vec::new();
        if let Some(m) = matrix {
            if hyperbolic && tree.is_on_axis(m, v)? {
                tags.push("axis");
            } else if &tree.action(m, v)? == v {
                tags.push("fixed");
            }
        }
        if let Some(e) = end {
            if tree.in_end(v, e)? {
                tags.push("end");
            }
        }
        if tree.in_inf_end(v) {
            tags.push("inf");
        }
        if tree.vertex_is_origin(v) {
            tags.push("origin");
        }

        let edge = node.edge.map_or_else(|| "*".to_owned(), |e| e.to_string());
        let tags = if tags.is_empty() { String::new() } else { format!("  [{}]", tags.join(", ")) };
        println!("{:indent$}{edge} {}{tags}", "", tree.vertex_to_string(v), indent = level * 2);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_and_subcommand_flags() {
        let cli = Cli::try_parse_from(["btt", "--field", "function", "--prime", "5", "classify", "--matrix", "1,0,-1,9"])
            .unwrap();
        assert_eq!(cli.field, FieldOpt::Function);
        assert_eq!(cli.prime, 5);
        assert!(matches!(cli.cmd, Cmd::Classify { ref matrix } if matrix.matrix == [1, 0, -1, 9]));

        let cli = Cli::try_parse_from(["btt", "neighbors", "--u", "-1/3", "--n", "-2"]).unwrap();
        assert!(matches!(cli.cmd, Cmd::Neighbors { ref vertex } if vertex.u == "-1/3" && vertex.n == -2));
        assert!(Cli::try_parse_from(["btt", "classify"]).is_err());
    }

    #[test]
    fn parses_elements() {
        let adic = Adic::new(3).unwrap();
        assert_eq!(adic.parse_element("6/4").unwrap(), Rational::new(3, 2).unwrap());
        assert_eq!(adic.parse_element(" -5 ").unwrap(), Rational::int(-5));
        let deep = adic.parse_element("1/717897987691852588770249").unwrap();
        assert_eq!(adic.valuation(&deep), btt_fields::ExtendedInt::Finite(-50));
        assert!(adic.parse_element("1/0").is_err());
        assert!(adic.parse_element("x").is_err());

        let ff = FunctionField::new(3).unwrap();
        assert_eq!(ff.parse_element("0,1").unwrap(), ff.from_ints(&[0, 1]));
        assert_eq!(ff.parse_element("1/0,1").unwrap(), ff.fraction(&[1], &[0, 1]).unwrap());
        assert_eq!(ff.parse_element("").unwrap(), ff.zero());
        assert_eq!(parse_coeffs("1, 2 ,").unwrap(), [1, 2]);
    }

    #[test]
    fn matrices_are_column_major() {
        let tree = BruhatTitsTree::new(Adic::new(3).unwrap()).unwrap();
        let m = parse_matrix(&tree, &[1, 2, 3, 4]).unwrap();
        assert_eq!(tree.algebra().column(0, &m), vec![Rational::int(1), Rational::int(2)]);
        assert!(parse_matrix(&tree, &[1, 2, 3]).is_err());
        assert!(parse_end(&tree, &[0, 0]).is_err());
    }

    #[test]
    fn commands_run() {
        let tree = BruhatTitsTree::new(Adic::new(3).unwrap()).unwrap();
        let cmds = [
            Cmd::Info,
            Cmd::Classify { matrix: MatrixArg { matrix: vec![1, 0, 0, 9] } },
            Cmd::Render {
                vertex: VertexArg { u: "0".to_owned(), n: 0 },
                depth: 2,
                matrix: Some(vec![1, 0, 0, 9]),
                end: Some(vec![0, 1]),
            },
        ];
        for cmd in &cmds {
            run(&tree, cmd).unwrap();
        }
        let singular = Cmd::Classify { matrix: MatrixArg { matrix: vec![1, 2, 2, 4] } };
        assert!(run(&tree, &singular).is_err());
    }
}
