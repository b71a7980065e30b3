pub const USAGE: &str = "\
📊 GPU Price Charts

Charts
  history <model> [range] [style] [--out FILE]
      Daily price history for a GPU model. Range and style may also be
      given as --range and --style.
      range: all, 1w, 1m, 3m, 6m, 1y (default: all)
      style: line, area, bar, candlestick (default: line)
      --out: write the chart to a .png or .svg file

Market
  analyze <model> <price>     Compare a price against the market average
  listings [model] [page]     Browse current marketplace listings
  market                      This week's most listed models and best deals

Account
  register <email> <password> Create an account and start a session
  login <email> <password>    Start a session
  logout                      Forget the saved session
  favorite list               Show your favorite models
  favorite add|remove <model> Save or drop a favorite model
  alert <model> <threshold>   Notify me when the price drops below threshold
  alert list                  Show your price alerts
  alert remove <id>           Delete a price alert

Admin
  admin outliers [threshold]  Listings far from their model's average (default 1.75)
  admin purge [threshold]     Delete those outliers
  admin scrape                Fetch and save new marketplace posts

Examples
  history RTX 3080 3m candlestick --out rtx3080.png
  analyze RX 6800 350
";

pub fn execute() -> Result<(), String> {
    println!("{}", USAGE);
    Ok(())
}
