pub const USAGE: &'static str = "
Usage: rates_analysis <mode> <arguments> [key=value ...]

                                plot \n
rates_analysis plot <output_dir> <species> <top_n> <start> <end> [key=value ...]
    output_dir   model output directory with productionRates.output and lossRates.output
    species      comma separated list (e.g. NO2,O3,NO3), ALL, or NOx
    top_n        number of reactions shown per species, the rest is summed into Other
    start        model time or START
    end          model time or END
  Optional keys:
    drop_rev=True|False            ignore reactions whose reverse is in the same file (default True)
    title_page_text=<text>         text added to the title page
    remove_l_reactions=<list>      loss reactions left out, e.g. NO3=NO2+O3,NO2+O3=NO3
    remove_p_reactions=<list>      production reactions left out
    exclusive_l_reactions=<list>   the only loss reactions plotted
    exclusive_p_reactions=<list>   the only production reactions plotted
    lump_l_reactions=<mapping>     loss reactions summed into categories per species, e.g.
                                   \"{'NO2':{'NOx':['NO2+O3=NO3','HO2+NO2=OH+NO2']},'HO2':{'HOx':'HO2+O3=OH'}}\"
    lump_p_reactions=<mapping>     production reactions summed into categories
    report_path=<prefix>           prefix of the SVG pages (default temp_rates_plot)

                                average \n
rates_analysis average <output_dir> <species> <top_n> <start> <end> [key=value ...]
    prints the top_n reactions of every species by mean rate over [start, end];
    reversible pairs are netted (+ve = net production, -ve = net loss)
    only the keys listed under all modes are accepted

                                summed \n
rates_analysis summed <output_dir> <species> [key=value ...]
    net rate (production - loss) / concentration in s-1 of a single species, read
    with speciesConcentrations.output and written to report_path (default temp_total_rates)
    report_path and the keys listed under all modes are accepted

                                all modes \n
    log_level=error|warn|info|debug|trace|off    (default info)
    save_logs=<file>                             also write the log to a file
    options_file=<file.json>                     options as JSON, read before the other keys
";
