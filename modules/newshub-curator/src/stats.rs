/// Stats from a curator run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub approved_in_sheet: u32,
    pub already_processed: u32,
    pub retweeted: u32,
    pub retweet_failed: u32,
    pub posts_discovered: u32,
    pub queries_failed: u32,
    pub dropped_known: u32,
    pub dropped_duplicate: u32,
    pub posts_forwarded: u32,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Curator Run Complete ===")?;
        writeln!(f, "Approved in sheet:  {}", self.approved_in_sheet)?;
        writeln!(f, "Already processed:  {}", self.already_processed)?;
        writeln!(f, "Retweeted:          {}", self.retweeted)?;
        writeln!(f, "Retweet failures:   {}", self.retweet_failed)?;
        writeln!(f, "Posts discovered:   {}", self.posts_discovered)?;
        writeln!(f, "Queries failed:     {}", self.queries_failed)?;
        writeln!(f, "Already in sheet:   {}", self.dropped_known)?;
        writeln!(f, "Cross-query dupes:  {}", self.dropped_duplicate)?;
        writeln!(f, "Posts forwarded:    {}", self.posts_forwarded)?;
        Ok(())
    }
}
